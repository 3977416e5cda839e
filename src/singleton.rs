//! Single-instance enforcement for process-wide static classes.
//!
//! OpenGL-style global state means some classes must be backed by exactly
//! one object per process, no matter how many times their declaration runs
//! (repeated module evaluation, a copy-pasted declaration in a second
//! translation unit, and so on). [`SingleInstancePolicy`] is that guard:
//! each static-class family owns one policy, the first declaration
//! materializes the class and runs its one-time initializer, and every
//! later declaration is warned about and aliased to the original.
//!
//! Materialization is race-free: the slot is a [`OnceLock`], so if two
//! threads race on the first declaration exactly one initializer runs and
//! the loser takes the redundant-declaration path.

use std::convert::Infallible;
use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised by the static-class machinery.
#[derive(Debug)]
pub enum StaticClassError {
    /// Code attempted to construct an instance of a static class. Always a
    /// programming error; there is nothing to recover.
    InstantiationForbidden {
        /// Qualified name of the class whose construction was attempted.
        class: String,
    },
}

impl fmt::Display for StaticClassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InstantiationForbidden { class } => {
                write!(f, "`{class}` is a static class and cannot be instantiated")
            }
        }
    }
}

impl std::error::Error for StaticClassError {}

// ---------------------------------------------------------------------------
// Descriptors
// ---------------------------------------------------------------------------

/// Diagnostic identity of a static-class family member: the declared name
/// plus the declaring module (pass [`module_path!`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticClassDescriptor {
    name: &'static str,
    module: &'static str,
}

impl StaticClassDescriptor {
    /// Descriptor for a class `name` declared in `module`.
    #[must_use]
    pub const fn new(name: &'static str, module: &'static str) -> Self {
        Self { name, module }
    }

    /// The declared class name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The declaring-module qualifier.
    #[must_use]
    pub fn module(&self) -> &'static str {
        self.module
    }
}

impl fmt::Display for StaticClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module, self.name)
    }
}

// ---------------------------------------------------------------------------
// Materialized class
// ---------------------------------------------------------------------------

/// The one class object a family is permitted: its descriptor plus the
/// `members` record the family's declaration requested.
///
/// Derefs to `T`, so members read naturally through the handle. The only
/// fallible operation is [`instantiate`](Self::instantiate), which always
/// fails: a static class is a namespace, not a constructor.
#[derive(Debug)]
pub struct MaterializedStaticClass<T> {
    descriptor: StaticClassDescriptor,
    members: T,
}

impl<T> MaterializedStaticClass<T> {
    /// Diagnostic identity this class was materialized under.
    #[must_use]
    pub fn descriptor(&self) -> &StaticClassDescriptor {
        &self.descriptor
    }

    /// The process-wide members record.
    #[must_use]
    pub fn members(&self) -> &T {
        &self.members
    }

    /// Instantiation guard. Unconditionally fails with
    /// [`StaticClassError::InstantiationForbidden`]; it exists so misuse
    /// surfaces as an error value rather than silently minting a second
    /// copy of process-wide state.
    ///
    /// # Errors
    ///
    /// Always.
    pub fn instantiate(&self) -> Result<Infallible, StaticClassError> {
        Err(StaticClassError::InstantiationForbidden {
            class: self.descriptor.to_string(),
        })
    }
}

impl<T> Deref for MaterializedStaticClass<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.members
    }
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Construction-time guard ensuring at most one materialized class per
/// family.
///
/// One policy per family; families using distinct policies never collide.
/// `new` is `const`, so the policy usually lives in a `static` next to the
/// facade it protects:
///
/// ```
/// use monogl::singleton::{SingleInstancePolicy, StaticClassDescriptor};
///
/// struct AudioState {
///     sample_rate: u32,
/// }
///
/// static POLICY: SingleInstancePolicy<AudioState> =
///     SingleInstancePolicy::new("AudioState");
///
/// let class = POLICY.declare(
///     StaticClassDescriptor::new("AudioState", module_path!()),
///     || AudioState { sample_rate: 48_000 },
/// );
/// assert_eq!(class.sample_rate, 48_000);
/// ```
pub struct SingleInstancePolicy<T> {
    family: &'static str,
    slot: OnceLock<MaterializedStaticClass<T>>,
    rejected: AtomicU64,
}

impl<T> SingleInstancePolicy<T> {
    /// A fresh, unmaterialized policy guarding `family`.
    #[must_use]
    pub const fn new(family: &'static str) -> Self {
        Self {
            family,
            slot: OnceLock::new(),
            rejected: AtomicU64::new(0),
        }
    }

    /// Process a declaration of this family's static class.
    ///
    /// The first call materializes: `init` (the family's one-time
    /// initializer, producing the members record) runs exactly once,
    /// synchronously, and its result is recorded as the canonical class
    /// object. Every later call emits one `log::warn!` diagnostic naming
    /// the rejected declaration and the original class, then returns the
    /// original unchanged; `init` never runs again, so the redundant
    /// declaration's intended members are silently dropped.
    ///
    /// The returned handle is always the canonical class object.
    pub fn declare<F>(
        &self,
        descriptor: StaticClassDescriptor,
        init: F,
    ) -> &MaterializedStaticClass<T>
    where
        F: FnOnce() -> T,
    {
        let mut materialized_now = false;
        let class = self.slot.get_or_init(|| {
            materialized_now = true;
            MaterializedStaticClass {
                descriptor,
                members: init(),
            }
        });
        if !materialized_now {
            let _ = self.rejected.fetch_add(1, Ordering::Relaxed);
            log::warn!("{}", self.redundancy_warning(descriptor, class.descriptor()));
        }
        class
    }

    /// The canonical class object, if this family has materialized.
    #[must_use]
    pub fn get(&self) -> Option<&MaterializedStaticClass<T>> {
        self.slot.get()
    }

    /// Whether the family has materialized its class yet.
    #[must_use]
    pub fn is_materialized(&self) -> bool {
        self.slot.get().is_some()
    }

    /// The family name this policy guards.
    #[must_use]
    pub fn family(&self) -> &'static str {
        self.family
    }

    /// How many redundant declarations this policy has rejected so far.
    #[must_use]
    pub fn rejected_declarations(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    fn redundancy_warning(
        &self,
        rejected: StaticClassDescriptor,
        original: &StaticClassDescriptor,
    ) -> String {
        format!(
            "<class {rejected}> attempts to become a second instance of the \
             `{}` family; only one can exist, so <class {rejected}> is just \
             an alias for <class {original}>",
            self.family
        )
    }
}

impl<T> fmt::Debug for SingleInstancePolicy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleInstancePolicy")
            .field("family", &self.family)
            .field("materialized", &self.is_materialized())
            .field("rejected", &self.rejected_declarations())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    struct Foo {
        x: i32,
    }

    #[test]
    fn first_declaration_materializes_with_requested_members() {
        let policy: SingleInstancePolicy<Foo> = SingleInstancePolicy::new("Foo");
        let class = policy.declare(
            StaticClassDescriptor::new("Foo", module_path!()),
            || Foo { x: 1 },
        );
        assert_eq!(class.x, 1);
        assert_eq!(class.descriptor().name(), "Foo");
        assert!(policy.is_materialized());
        assert_eq!(policy.rejected_declarations(), 0);
    }

    #[test]
    fn redundant_declarations_alias_the_original() {
        // Scenario: a module gets evaluated twice and re-declares Foo with
        // a different field value. The original wins.
        let policy: SingleInstancePolicy<Foo> = SingleInstancePolicy::new("Foo");
        let first = policy.declare(
            StaticClassDescriptor::new("Foo", module_path!()),
            || Foo { x: 1 },
        );
        let second = policy.declare(
            StaticClassDescriptor::new("Foo", module_path!()),
            || Foo { x: 2 },
        );
        assert!(std::ptr::eq(first, second));
        assert_eq!(second.x, 1);
        assert_eq!(policy.rejected_declarations(), 1);
    }

    #[test]
    fn initializer_runs_exactly_once_across_many_declarations() {
        let policy: SingleInstancePolicy<Foo> = SingleInstancePolicy::new("Foo");
        let runs = AtomicUsize::new(0);
        let first = policy.declare(
            StaticClassDescriptor::new("Foo", module_path!()),
            || {
                let _ = runs.fetch_add(1, Ordering::SeqCst);
                Foo { x: 7 }
            },
        );
        for _ in 0..10 {
            let again = policy.declare(
                StaticClassDescriptor::new("Foo", module_path!()),
                || {
                    let _ = runs.fetch_add(1, Ordering::SeqCst);
                    Foo { x: 0 }
                },
            );
            assert!(std::ptr::eq(first, again));
        }
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(policy.rejected_declarations(), 10);
    }

    #[test]
    fn instantiation_always_fails() {
        let policy: SingleInstancePolicy<Foo> = SingleInstancePolicy::new("Foo");
        let class = policy.declare(
            StaticClassDescriptor::new("Foo", module_path!()),
            || Foo { x: 1 },
        );

        let err = class.instantiate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Foo"));
        assert!(msg.contains("static class and cannot be instantiated"));

        // Still forbidden after the class has been in use for a while.
        for _ in 0..5 {
            assert_eq!(class.members().x, 1);
        }
        assert!(class.instantiate().is_err());
    }

    #[test]
    fn redundancy_warning_names_both_classes() {
        let policy: SingleInstancePolicy<Foo> = SingleInstancePolicy::new("Foo");
        let original = StaticClassDescriptor::new("Foo", "crate_a::gfx");
        let rejected = StaticClassDescriptor::new("FooAgain", "crate_b::gfx");
        let _ = policy.declare(original, || Foo { x: 1 });

        let msg = policy.redundancy_warning(rejected, &original);
        assert!(msg.contains("crate_b::gfx::FooAgain"));
        assert!(msg.contains("crate_a::gfx::Foo"));
        assert!(msg.contains("`Foo` family"));
    }

    #[test]
    fn distinct_policies_do_not_collide() {
        let shaders: SingleInstancePolicy<Foo> = SingleInstancePolicy::new("Shaders");
        let textures: SingleInstancePolicy<Foo> = SingleInstancePolicy::new("Textures");
        let a = shaders.declare(
            StaticClassDescriptor::new("Shaders", module_path!()),
            || Foo { x: 1 },
        );
        let b = textures.declare(
            StaticClassDescriptor::new("Textures", module_path!()),
            || Foo { x: 2 },
        );
        assert_eq!(a.x, 1);
        assert_eq!(b.x, 2);
        assert_eq!(shaders.rejected_declarations(), 0);
        assert_eq!(textures.rejected_declarations(), 0);
    }

    #[test]
    fn get_is_none_until_materialization() {
        let policy: SingleInstancePolicy<Foo> = SingleInstancePolicy::new("Foo");
        assert!(policy.get().is_none());
        assert!(!policy.is_materialized());
        let _ = policy.declare(
            StaticClassDescriptor::new("Foo", module_path!()),
            || Foo { x: 3 },
        );
        assert_eq!(policy.get().map(|c| c.x), Some(3));
    }

    #[test]
    fn racing_declarations_materialize_exactly_once() {
        static POLICY: SingleInstancePolicy<usize> = SingleInstancePolicy::new("Racy");
        static RUNS: AtomicUsize = AtomicUsize::new(0);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                std::thread::spawn(move || {
                    let class = POLICY.declare(
                        StaticClassDescriptor::new("Racy", module_path!()),
                        || {
                            let _ = RUNS.fetch_add(1, Ordering::SeqCst);
                            i
                        },
                    );
                    *class.members()
                })
            })
            .collect();
        let values: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(RUNS.load(Ordering::SeqCst), 1);
        // Every thread observed the same winning value.
        assert!(values.windows(2).all(|w| w[0] == w[1]));
    }
}
