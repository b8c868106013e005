use graft_inject::prelude::*;

#[derive(Default, Injectable)]
struct Pool;

#[derive(Injectable)]
struct Service(#[inject] Dep<Pool>);

fn main() {}
