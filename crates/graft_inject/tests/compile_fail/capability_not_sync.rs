use graft_inject::capability;

#[capability]
trait Store: Send {
    fn len(&self) -> usize;
}

fn main() {}
