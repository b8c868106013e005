use graft_inject::prelude::*;

#[derive(Default, Injectable)]
struct Pool;

#[derive(Injectable)]
struct Service {
    #[inject]
    #[inject(private)]
    pool: Dep<Pool>,
}

fn main() {}
