use graft_inject::prelude::*;

#[derive(Default, Injectable)]
struct Leaf;

#[derive(Default, Injectable)]
struct Forms {
    #[inject]
    standard: Dep<Leaf>,
    #[inject = ""]
    empty_tag: Dep<Leaf>,
    #[inject(private)]
    private: Dep<Leaf>,
    #[inject = "private"]
    private_tag: Dep<Leaf>,
    #[inject(name = "leaf")]
    named: Dep<Leaf>,
    #[inject = "other leaf"]
    named_tag: Dep<Leaf>,
    #[inject]
    optional: Option<Shared<Leaf>>,
    #[inject]
    r#type: Dep<Leaf>,
    plain: u32,
}

fn main() {
    let fields = Forms::fields();
    assert_eq!(fields.len(), 8);
    assert_eq!(fields[0].directive(), &Directive::Standard);
    assert_eq!(fields[1].directive(), &Directive::Standard);
    assert_eq!(fields[2].directive(), &Directive::Private);
    assert_eq!(fields[3].directive(), &Directive::Private);
    assert_eq!(fields[4].directive().name(), Some("leaf"));
    assert_eq!(fields[5].directive().name(), Some("other leaf"));
    assert_eq!(fields[7].name(), "type");

    let forms = Forms::default();
    assert_eq!(forms.plain, 0);
    let _ = (
        &forms.standard,
        &forms.empty_tag,
        &forms.private,
        &forms.private_tag,
        &forms.named,
        &forms.named_tag,
        &forms.optional,
        &forms.r#type,
    );
}
