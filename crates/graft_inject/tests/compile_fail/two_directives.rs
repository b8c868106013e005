use graft_inject::prelude::*;

#[derive(Default, Injectable)]
struct Pool;

#[derive(Injectable)]
struct Service {
    #[inject(private, name = "pool")]
    pool: Dep<Pool>,
}

fn main() {}
