//! Capability-set fields (`Dep<dyn Trait>`).

use graft_inject::prelude::*;

#[capability]
trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

#[capability]
trait Farewell: Send + Sync {
    fn bye(&self) -> String;
}

#[derive(Default, Injectable)]
#[injectable(provides(Greeter, Farewell))]
struct English;

impl Greeter for English {
    fn greet(&self) -> String {
        "hello".to_string()
    }
}

impl Farewell for English {
    fn bye(&self) -> String {
        "goodbye".to_string()
    }
}

#[derive(Default, Injectable)]
#[injectable(provides(Greeter))]
struct French;

impl Greeter for French {
    fn greet(&self) -> String {
        "bonjour".to_string()
    }
}

#[derive(Default, Injectable)]
struct Mute;

#[derive(Default, Injectable)]
struct Host {
    #[inject]
    greeter: Dep<dyn Greeter>,
    #[inject]
    farewell: Option<Shared<dyn Farewell>>,
}

#[derive(Default, Injectable)]
struct Guest {
    #[inject]
    greeter: Dep<dyn Greeter>,
}

/// Asks for the concrete type, so the resolver creates the only implementer.
#[derive(Default, Injectable)]
struct Venue {
    #[inject]
    english: Dep<English>,
}

#[derive(Default, Injectable)]
struct Translator {
    #[inject(name = "fr")]
    greeter: Dep<dyn Greeter>,
}

#[derive(Default, Injectable)]
struct Hermit {
    #[inject(private)]
    greeter: Dep<dyn Greeter>,
}

#[derive(Default, Injectable)]
struct Owner {
    #[inject(private)]
    english: Dep<English>,
}

fn seeded(seed: u64) -> ResolverConfig {
    ResolverConfig::new().with_traversal(TraversalOrder::Seeded(seed))
}

// ═══════════════════════════════════════════════════════════════════════════════
// MATCHING
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn single_implementer_satisfies_every_capability_field() {
    let english = shared(English);
    let host = shared(Host::default());

    populate((english.clone(), shared(Mute), host.clone())).unwrap();

    let host = host.read();
    assert!(host.greeter.points_to(&english));
    assert_eq!(host.greeter.read().greet(), "hello");

    let farewell = host.farewell.as_ref().expect("farewell resolved");
    assert_eq!(farewell.read().bye(), "goodbye");
}

#[test]
fn no_implementer_is_unsatisfied() {
    let result = populate((shared(Mute), shared(Guest::default())));

    match result {
        Err(InjectError::UnsatisfiedDependency {
            field, wanted, name, ..
        }) => {
            assert_eq!(field, "greeter");
            assert!(wanted.contains("Greeter"));
            assert_eq!(name, None);
        }
        other => panic!("expected unsatisfied capability, got {other:?}"),
    }
}

#[test]
fn several_implementers_are_ambiguous() {
    let result = populate((shared(English), shared(French), shared(Guest::default())));

    assert!(matches!(
        result,
        Err(InjectError::AmbiguousDependency { field: "greeter", ref candidates, .. })
            if candidates.len() == 2
    ));
}

/// The implementer only exists once `Venue` is resolved; the capability field
/// must find it whichever object is visited first.
#[test]
fn synthesized_implementers_are_found_in_any_order() {
    for seed in 0..32 {
        let guest = shared(Guest::default());
        let venue = shared(Venue::default());

        let mut graph = Graph::with_config(seeded(seed));
        graph
            .provide_all([Object::new(guest.clone()), Object::new(venue.clone())])
            .unwrap();
        graph.resolve().unwrap();

        let english = venue.read().english.get().cloned().expect("english created");
        assert!(guest.read().greeter.points_to(&english), "seed {seed}");
        assert_eq!(graph.len(), 3, "seed {seed}");
    }
}

#[test]
fn private_implementers_are_not_candidates() {
    let result = populate_with(
        seeded(7),
        (shared(Owner::default()), shared(Guest::default())),
    );

    assert!(matches!(
        result,
        Err(InjectError::UnsatisfiedDependency { field: "greeter", .. })
    ));
}

#[test]
fn named_objects_are_not_capability_candidates() {
    let result = populate((
        Object::new(shared(English)).named("en"),
        shared(Guest::default()),
    ));

    assert!(matches!(
        result,
        Err(InjectError::UnsatisfiedDependency { field: "greeter", .. })
    ));
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAMED AND PRIVATE CAPABILITY FIELDS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn named_capability_field_accepts_any_implementer() {
    let french = shared(French);
    let translator = shared(Translator::default());

    populate((
        Object::new(french.clone()).named("fr"),
        shared(English),
        translator.clone(),
    ))
    .unwrap();

    assert!(translator.read().greeter.points_to(&french));
    assert_eq!(translator.read().greeter.read().greet(), "bonjour");
}

#[test]
fn named_non_implementer_is_a_mismatch() {
    let result = populate((
        Object::new(shared(Mute)).named("fr"),
        shared(Translator::default()),
    ));

    match result {
        Err(InjectError::TypeMismatch { found, wanted, .. }) => {
            assert!(found.ends_with("Mute"));
            assert!(wanted.contains("Greeter"));
        }
        other => panic!("expected type mismatch, got {other:?}"),
    }
}

#[test]
fn private_capability_field_cannot_be_synthesized() {
    let result = populate((shared(English), shared(Hermit::default())));

    assert!(matches!(
        result,
        Err(InjectError::UnsatisfiedDependency { field: "greeter", .. })
    ));
}
