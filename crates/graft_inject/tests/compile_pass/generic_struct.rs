use graft_inject::prelude::*;

#[derive(Default, Injectable)]
struct Engine {
    cylinders: u8,
}

#[derive(Default, Injectable)]
struct Wrapper<T: Injectable + Default> {
    #[inject]
    inner: Dep<T>,
}

fn main() {
    let wrapper = shared(Wrapper::<Engine>::default());
    populate(wrapper.clone()).unwrap();
    assert_eq!(wrapper.read().inner.read().cylinders, 0);
    assert_eq!(Wrapper::<Engine>::fields().len(), 1);
}
