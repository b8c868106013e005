use graft_inject::capability;

#[capability(shared)]
trait Store: Send + Sync {}

fn main() {}
