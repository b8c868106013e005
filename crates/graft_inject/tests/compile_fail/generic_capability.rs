use graft_inject::capability;

#[capability]
trait Store<T>: Send + Sync {
    fn get(&self) -> T;
}

fn main() {}
