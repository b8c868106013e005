use graft_inject::prelude::*;

#[capability]
pub trait Storage: Send + Sync + 'static {
    fn get(&self, key: &str) -> Option<String>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

#[capability]
trait Named: core::marker::Send + core::marker::Sync {
    fn name(&self) -> &str;
}

#[derive(Injectable)]
#[injectable(provides(Storage, Named), no_default)]
struct Memory {
    label: String,
}

impl Storage for Memory {
    fn get(&self, key: &str) -> Option<String> {
        (key == self.label).then(|| self.label.clone())
    }
}

impl Named for Memory {
    fn name(&self) -> &str {
        &self.label
    }
}

#[derive(Default, Injectable)]
struct Reader {
    #[inject]
    storage: Dep<dyn Storage>,
    #[inject]
    named: Dep<dyn Named>,
}

fn main() {
    assert!(Memory::construct().is_none());
    assert_eq!(Memory::capabilities().len(), 2);

    let reader = shared(Reader::default());
    populate((shared(Memory { label: "k".into() }), reader.clone())).unwrap();

    let reader = reader.read();
    assert!(reader.storage.read().contains("k"));
    assert_eq!(reader.named.read().name(), "k");
}
