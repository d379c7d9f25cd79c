//! Effective policy resolution.
//!
//! Merges a handler's registered uniqueness options over the global defaults
//! into the policy the filter and digest steps act on. Pure function of its
//! inputs; absent options default safely.

use uniquejobs_config::UniquenessConfig;
use uniquejobs_registry::{FilterSpec, Resolution};

/// Per-submission merge of handler overrides and global defaults.
#[derive(Debug, Clone)]
pub struct EffectivePolicy {
    pub prefix: String,
    pub args_enabled: bool,
    pub all_queues: bool,
    pub filter: FilterSpec,
}

/// Resolve the effective policy for one submission.
pub fn resolve(resolution: &Resolution<'_>, config: &UniquenessConfig) -> EffectivePolicy {
    let options = match resolution {
        Resolution::Capable(handler) => Some(handler.options()),
        Resolution::NotCapable | Resolution::Unresolved => None,
    };

    let prefix = options
        .and_then(|o| o.prefix.as_deref())
        .filter(|p| !p.is_empty())
        .unwrap_or(&config.unique_prefix)
        .to_string();

    // Two independent enablement signals on the handler side: the explicit
    // flag and a configured filter. Either one wins over the global default.
    let enabled_by_handler =
        options.is_some_and(|o| o.args_enabled || o.filter.is_configured());
    let args_enabled = enabled_by_handler || config.unique_args_enabled;

    // Queue removal only applies to a capable handler with args enabled.
    let all_queues = args_enabled && options.is_some_and(|o| o.on_all_queues);

    let filter = options.map(|o| o.filter.clone()).unwrap_or_default();

    EffectivePolicy {
        prefix,
        args_enabled,
        all_queues,
        filter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uniquejobs_registry::{CapableHandler, HandlerProvider, HandlerRegistry, UniqueOptions};

    fn config(enabled: bool) -> UniquenessConfig {
        UniquenessConfig {
            unique_prefix: "uniquejobs".to_string(),
            unique_args_enabled: enabled,
        }
    }

    fn registry_with(options: UniqueOptions) -> HandlerRegistry {
        let mut registry = HandlerRegistry::new();
        registry.register("OrderJob", CapableHandler::new(options));
        registry
    }

    #[test]
    fn not_capable_uses_global_defaults() {
        let mut registry = HandlerRegistry::new();
        registry.register_plain("Mailer");

        let policy = resolve(&registry.resolve("Mailer"), &config(false));
        assert_eq!(policy.prefix, "uniquejobs");
        assert!(!policy.args_enabled);
        assert!(!policy.all_queues);
        assert!(matches!(policy.filter, FilterSpec::Unset));
    }

    #[test]
    fn prefix_override_wins() {
        let registry = registry_with(UniqueOptions::new().prefix("custom"));
        let policy = resolve(&registry.resolve("OrderJob"), &config(false));
        assert_eq!(policy.prefix, "custom");
    }

    #[test]
    fn empty_prefix_override_falls_back() {
        let registry = registry_with(UniqueOptions::new().prefix(""));
        let policy = resolve(&registry.resolve("OrderJob"), &config(false));
        assert_eq!(policy.prefix, "uniquejobs");
    }

    #[test]
    fn args_enabled_by_explicit_flag() {
        let registry = registry_with(UniqueOptions::new().enable_args());
        let policy = resolve(&registry.resolve("OrderJob"), &config(false));
        assert!(policy.args_enabled);
    }

    #[test]
    fn args_enabled_by_configured_filter() {
        let registry = registry_with(UniqueOptions::new().filter_method("filtered_args"));
        let policy = resolve(&registry.resolve("OrderJob"), &config(false));
        assert!(policy.args_enabled);
    }

    #[test]
    fn args_enabled_by_global_default() {
        let registry = registry_with(UniqueOptions::new());
        let policy = resolve(&registry.resolve("OrderJob"), &config(true));
        assert!(policy.args_enabled);

        let policy = resolve(&registry.resolve("NoSuchJob"), &config(true));
        assert!(policy.args_enabled);
    }

    #[test]
    fn disabled_filter_marker_does_not_enable() {
        let registry = registry_with(UniqueOptions::new().disable_filter());
        let policy = resolve(&registry.resolve("OrderJob"), &config(false));
        assert!(!policy.args_enabled);
    }

    #[test]
    fn all_queues_requires_args_enabled() {
        let registry = registry_with(UniqueOptions::new().on_all_queues());
        let policy = resolve(&registry.resolve("OrderJob"), &config(false));
        assert!(!policy.all_queues);

        let registry = registry_with(UniqueOptions::new().on_all_queues().enable_args());
        let policy = resolve(&registry.resolve("OrderJob"), &config(false));
        assert!(policy.all_queues);

        // Global enablement also satisfies the gate.
        let registry = registry_with(UniqueOptions::new().on_all_queues());
        let policy = resolve(&registry.resolve("OrderJob"), &config(true));
        assert!(policy.all_queues);
    }
}
