use graft_inject::prelude::*;

#[derive(Default, Injectable)]
struct Pool;

#[derive(Injectable)]
struct Service {
    #[inject = 5]
    pool: Dep<Pool>,
}

fn main() {}
