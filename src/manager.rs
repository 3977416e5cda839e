//! Process-wide rendering resource manager.
//!
//! [`RenderManager`] is a static facade over the one rendering context and
//! the shader/texture pools. It is governed by its own
//! [`SingleInstancePolicy`], so its process-wide state materializes exactly
//! once: either through an explicit [`RenderManager::declare`] call early in
//! startup, or lazily the first time any accessor runs. After that, every
//! accessor returns the same handle for the rest of the process; there is
//! no teardown.

use std::convert::Infallible;

use crate::config::GlobalConfig;
use crate::gpu::pools::{ShaderPool, TexturePool};
use crate::gpu::render_context::RenderingContext;
use crate::singleton::{
    MaterializedStaticClass, SingleInstancePolicy, StaticClassDescriptor, StaticClassError,
};

static MANAGER: SingleInstancePolicy<RenderState> = SingleInstancePolicy::new("RenderManager");

/// The process-wide fields owned by the manager's one class object.
#[derive(Debug)]
pub struct RenderState {
    config: GlobalConfig,
    context: RenderingContext,
    shader_pool: ShaderPool,
    texture_pool: TexturePool,
}

impl RenderState {
    fn new(config: GlobalConfig) -> Self {
        Self {
            config,
            context: RenderingContext::create(config.opengl_version),
            shader_pool: ShaderPool::new(),
            texture_pool: TexturePool::new(),
        }
    }

    /// Global rendering context.
    #[must_use]
    pub fn context(&self) -> &RenderingContext {
        &self.context
    }

    /// Shader cache.
    #[must_use]
    pub fn shader_pool(&self) -> &ShaderPool {
        &self.shader_pool
    }

    /// Texture cache, for reuse between render calls.
    #[must_use]
    pub fn texture_pool(&self) -> &TexturePool {
        &self.texture_pool
    }

    /// The configuration the manager was initialized with.
    #[must_use]
    pub fn config(&self) -> GlobalConfig {
        self.config
    }
}

/// Static facade over the process-wide rendering resources.
///
/// Never constructed; use the associated accessors. Attempting to build
/// an instance anyway (via [`RenderManager::instantiate`]) fails per the
/// static-class guard.
pub struct RenderManager {
    _static: Infallible,
}

impl RenderManager {
    /// Process the manager's declaration now.
    ///
    /// The first call materializes the manager: the global configuration is
    /// declared (through its own private policy), then the rendering
    /// context is created at the configured OpenGL version, then both
    /// pools. Later calls emit the policy's redundancy warning and return
    /// the original class object unchanged.
    ///
    /// Calling this explicitly at startup is optional; any accessor
    /// materializes on first use without the warning.
    pub fn declare() -> &'static MaterializedStaticClass<RenderState> {
        MANAGER.declare(
            StaticClassDescriptor::new("RenderManager", module_path!()),
            || {
                let config = {
                    // GlobalConfig gets its own policy; the binding lives
                    // only in this block so nothing can re-declare it.
                    static CONFIG: SingleInstancePolicy<GlobalConfig> =
                        SingleInstancePolicy::new("GlobalConfig");
                    *CONFIG
                        .declare(
                            StaticClassDescriptor::new("GlobalConfig", module_path!()),
                            GlobalConfig::default,
                        )
                        .members()
                };
                RenderState::new(config)
            },
        )
    }

    fn class() -> &'static MaterializedStaticClass<RenderState> {
        MANAGER.get().unwrap_or_else(Self::declare)
    }

    /// Global rendering context. Never null after materialization, and the
    /// same handle on every call.
    #[must_use]
    pub fn context() -> &'static RenderingContext {
        Self::class().context()
    }

    /// Shared shader pool.
    #[must_use]
    pub fn shader_pool() -> &'static ShaderPool {
        Self::class().shader_pool()
    }

    /// Shared texture pool.
    #[must_use]
    pub fn texture_pool() -> &'static TexturePool {
        Self::class().texture_pool()
    }

    /// Snapshot of the configuration the manager was initialized with.
    #[must_use]
    pub fn config() -> GlobalConfig {
        Self::class().config()
    }

    /// Instantiation guard: the manager is a static class, so this always
    /// fails.
    ///
    /// # Errors
    ///
    /// Always [`StaticClassError::InstantiationForbidden`].
    pub fn instantiate() -> Result<Infallible, StaticClassError> {
        Self::class().instantiate()
    }

    /// How many redundant manager declarations have been rejected.
    #[must_use]
    pub fn rejected_declarations() -> u64 {
        MANAGER.rejected_declarations()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // All tests share the one process-wide manager, so assertions are
    // either order-independent or based on counter deltas.

    #[test]
    fn materialization_reads_global_config() {
        let context = RenderManager::context();
        assert_eq!(context.version(), 330);
        assert_eq!(RenderManager::config(), GlobalConfig::default());
    }

    #[test]
    fn accessors_are_stable_across_calls() {
        assert!(std::ptr::eq(RenderManager::context(), RenderManager::context()));
        assert!(std::ptr::eq(
            RenderManager::shader_pool(),
            RenderManager::shader_pool()
        ));
        assert!(std::ptr::eq(
            RenderManager::texture_pool(),
            RenderManager::texture_pool()
        ));
    }

    #[test]
    fn manager_cannot_be_instantiated() {
        let err = RenderManager::instantiate().unwrap_err();
        assert!(err
            .to_string()
            .contains("static class and cannot be instantiated"));
    }

    #[test]
    fn redundant_declaration_aliases_the_original() {
        let first = RenderManager::declare();
        let before = RenderManager::rejected_declarations();
        let second = RenderManager::declare();
        assert!(std::ptr::eq(first, second));
        // `>` not `==`: a parallel test racing the very first
        // materialization can also take the redundant path.
        assert!(RenderManager::rejected_declarations() > before);
    }

    #[test]
    fn pools_hand_out_process_wide_slots() {
        let id = RenderManager::shader_pool().obtain("composite");
        assert_eq!(RenderManager::shader_pool().obtain("composite"), id);
    }
}
