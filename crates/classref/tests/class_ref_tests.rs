//! TypedClassRef behavior against the bundled registry

use classref::*;
use pretty_assertions::assert_eq;

#[derive(Debug, Default, Reflected)]
struct Entity;

#[derive(Debug, Default, Reflected)]
#[reflect(parent = Entity)]
struct Actor {
    tick_interval: u32,
}

#[derive(Debug, Default, Reflected)]
#[reflect(parent = Actor)]
struct Pawn;

#[derive(Debug, Reflected)]
#[reflect(parent = Pawn)]
struct Character {
    max_speed: f32,
}

#[derive(Debug, Default, Reflected)]
#[reflect(parent = Entity)]
struct Widget;

struct World {
    registry: ClassRegistry,
    object: ClassId,
    actor: ClassId,
    pawn: ClassId,
    character: ClassId,
    widget: ClassId,
}

fn world() -> anyhow::Result<World> {
    let _ = pretty_env_logger::try_init();

    let registry = ClassRegistry::new();
    let object = registry.register_default::<Entity>()?;
    let actor = registry.register_with_default::<Actor, _>(|_| {
        std::sync::Arc::new(Actor { tick_interval: 30 }) as ObjectRef
    })?;
    let pawn = registry.register_default::<Pawn>()?;
    let character = registry.register_with_default::<Character, _>(|_| {
        std::sync::Arc::new(Character { max_speed: 600.0 }) as ObjectRef
    })?;
    let widget = registry.register_default::<Widget>()?;

    Ok(World {
        registry,
        object,
        actor,
        pawn,
        character,
        widget,
    })
}

// ═══════════════════════════════════════════════════════════════════════
// Null References
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_default_constructed_resolves_to_none() -> anyhow::Result<()> {
    let w = world()?;
    let r = TypedClassRef::<Actor>::default();

    assert!(r.is_null());
    assert_eq!(r.resolve(&w.registry), None);
    assert_eq!(r.get(&w.registry), None);
    assert!(r.descriptor(&w.registry).is_none());
    assert_eq!(r.into_class(&w.registry), None);
    assert!(!r.is_valid(&w.registry));
    assert!(r.default_object(&w.registry).is_none());
    Ok(())
}

#[test]
fn test_from_none_is_null() {
    let r: TypedClassRef<Pawn> = None::<ClassId>.into();
    assert!(r.is_null());
    assert_eq!(r, TypedClassRef::new());
}

// ═══════════════════════════════════════════════════════════════════════
// Raw Handles
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_from_compatible_handle_resolves() -> anyhow::Result<()> {
    let w = world()?;

    assert_eq!(TypedClassRef::<Actor>::from(w.actor).resolve(&w.registry), Some(w.actor));
    assert_eq!(TypedClassRef::<Actor>::from(w.pawn).resolve(&w.registry), Some(w.pawn));
    assert_eq!(
        TypedClassRef::<Entity>::from(w.character).resolve(&w.registry),
        Some(w.character)
    );
    Ok(())
}

#[test]
fn test_incompatible_handle_resolves_to_none() -> anyhow::Result<()> {
    let w = world()?;

    // Stored as-is; rejected when read
    let base_in_derived = TypedClassRef::<Pawn>::from(w.actor);
    assert!(!base_in_derived.is_null());
    assert_eq!(base_in_derived.resolve(&w.registry), None);

    let sibling = TypedClassRef::<Actor>::from(w.widget);
    assert_eq!(sibling.get(&w.registry), None);
    assert!(sibling.descriptor(&w.registry).is_none());
    assert_eq!(sibling.into_class(&w.registry), None);
    Ok(())
}

#[test]
fn test_set_is_checked_on_get() -> anyhow::Result<()> {
    let w = world()?;
    let mut r = TypedClassRef::<Actor>::new();

    r.set(Some(w.object));
    assert!(!r.is_null());
    assert!(!r.is_valid(&w.registry));

    r.set(Some(w.pawn));
    assert!(r.is_valid(&w.registry));
    Ok(())
}

#[test]
fn test_handle_from_other_registry_rejected() -> anyhow::Result<()> {
    let w = world()?;
    let other = ClassRegistry::new();
    other.register::<Entity>()?;

    let foreign = ClassId::from_raw(99);
    assert_eq!(TypedClassRef::<Entity>::from(foreign).resolve(&w.registry), None);
    assert_eq!(TypedClassRef::<Entity>::from(foreign).resolve(&other), None);
    Ok(())
}

#[test]
fn test_unregistered_tag_resolves_to_none() -> anyhow::Result<()> {
    #[derive(Reflected)]
    #[reflect(parent = Actor)]
    struct Unregistered;

    let w = world()?;
    let r = TypedClassRef::<Unregistered>::from(w.actor);
    assert_eq!(r.resolve(&w.registry), None);
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
// Compatible References
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_from_compatible_copies_handle() -> anyhow::Result<()> {
    let w = world()?;
    let pawn_ref = TypedClassRef::<Pawn>::from(w.pawn);

    let actor_ref = TypedClassRef::<Actor>::from_compatible(&pawn_ref);
    let object_ref = TypedClassRef::<Entity>::from_compatible(&pawn_ref);
    let same_ref = TypedClassRef::<Pawn>::from_compatible(&pawn_ref);

    assert_eq!(actor_ref.resolve(&w.registry), pawn_ref.resolve(&w.registry));
    assert_eq!(object_ref.resolve(&w.registry), pawn_ref.resolve(&w.registry));
    assert_eq!(same_ref, pawn_ref);
    Ok(())
}

#[test]
fn test_assign_from_compatible() -> anyhow::Result<()> {
    let w = world()?;
    let character_ref = TypedClassRef::<Character>::from(w.character);
    let mut actor_ref = TypedClassRef::<Actor>::from(w.actor);

    actor_ref.assign(&character_ref);
    assert_eq!(
        actor_ref.resolve(&w.registry),
        character_ref.resolve(&w.registry)
    );

    actor_ref.assign(&TypedClassRef::<Pawn>::new());
    assert!(actor_ref.is_null());
    Ok(())
}

#[test]
fn test_upcast_chain() -> anyhow::Result<()> {
    let w = world()?;
    let character_ref = TypedClassRef::<Character>::from(w.character);

    let as_pawn: TypedClassRef<Pawn> = character_ref.upcast();
    let as_object = as_pawn.upcast::<Entity, _>();
    assert_eq!(as_object.resolve(&w.registry), Some(w.character));
    Ok(())
}

#[test]
fn test_copy_is_independent() -> anyhow::Result<()> {
    let w = world()?;
    let original = TypedClassRef::<Actor>::from(w.actor);
    let mut copy = original;
    copy.set(Some(w.pawn));

    assert_eq!(original.resolve(&w.registry), Some(w.actor));
    assert_eq!(copy.resolve(&w.registry), Some(w.pawn));
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
// Descriptor Access
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_descriptor_access() -> anyhow::Result<()> {
    let w = world()?;
    let r = TypedClassRef::<Actor>::from(w.pawn);

    let desc = r.descriptor(&w.registry).expect("pawn descriptor");
    assert_eq!(desc.name(), "Pawn");
    assert_eq!(desc.parent(), Some(w.actor));
    assert_eq!(desc.depth(), 2);
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
// Default Objects
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_default_object_of_exact_class() -> anyhow::Result<()> {
    let w = world()?;
    let r = TypedClassRef::<Actor>::from(w.actor);

    let cdo = r.default_object(&w.registry).expect("actor default");
    assert_eq!(cdo.class_name(), "Actor");
    assert_eq!(cdo.downcast_ref::<Actor>().map(|a| a.tick_interval), Some(30));
    Ok(())
}

#[test]
fn test_default_object_of_subclass_is_instance_of_base() -> anyhow::Result<()> {
    let w = world()?;
    let r = TypedClassRef::<Pawn>::from(w.character);

    let cdo = r.default_object(&w.registry).expect("character default");
    assert!(w.registry.is_a(cdo.object().as_ref(), w.pawn));
    assert_eq!(cdo.class_name(), "Character");
    assert_eq!(
        cdo.downcast_arc::<Character>().map(|c| c.max_speed),
        Some(600.0)
    );
    Ok(())
}

#[test]
fn test_default_object_is_canonical() -> anyhow::Result<()> {
    let w = world()?;
    let first = TypedClassRef::<Actor>::from(w.pawn).default_object(&w.registry);
    let second = TypedClassRef::<Entity>::from(w.pawn).default_object(&w.registry);

    let (first, second) = (first.expect("first"), second.expect("second"));
    assert!(std::sync::Arc::ptr_eq(first.object(), second.object()));
    Ok(())
}

#[test]
fn test_default_object_of_incompatible_ref_is_none() -> anyhow::Result<()> {
    let w = world()?;
    let r = TypedClassRef::<Pawn>::from(w.widget);
    assert!(r.default_object(&w.registry).is_none());
    assert!(!w.registry.has_cached_default(w.widget));
    Ok(())
}

#[test]
#[should_panic(expected = "is not an instance of")]
fn test_default_object_without_factory_panics() {
    #[derive(Reflected)]
    struct Bare;

    let registry = ClassRegistry::new();
    let bare = registry.register::<Bare>().expect("register");
    let _ = TypedClassRef::<Bare>::from(bare).default_object(&registry);
}

// ═══════════════════════════════════════════════════════════════════════
// Trait Objects
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_resolve_through_dyn_registry() -> anyhow::Result<()> {
    let w = world()?;
    let dynamic: &dyn TypeRegistry = &w.registry;
    let r = TypedClassRef::<Actor>::from(w.pawn);

    assert_eq!(r.resolve(dynamic), Some(w.pawn));
    assert!(r.default_object(dynamic).is_some());
    Ok(())
}

#[test]
fn test_resolve_through_shared_registry() -> anyhow::Result<()> {
    let w = world()?;
    let shared = std::sync::Arc::new(w.registry);
    let r = TypedClassRef::<Entity>::from(w.widget);

    let handle = std::thread::spawn({
        let shared = std::sync::Arc::clone(&shared);
        move || r.resolve(&shared)
    });
    assert_eq!(handle.join().expect("thread"), Some(w.widget));
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
// Detection
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_is_typed_class_ref_predicate() {
    assert!(is_typed_class_ref!(TypedClassRef<Actor>));
    assert!(is_typed_class_ref!(TypedClassRef<Character>));
    assert!(!is_typed_class_ref!(Actor));
    assert!(!is_typed_class_ref!(ClassId));
    assert!(!is_typed_class_ref!(ObjectRef));
    assert!(!is_typed_class_ref!(TypedObject<Actor>));
    assert!(!is_typed_class_ref!(Vec<TypedClassRef<Actor>>));
}
