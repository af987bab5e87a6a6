// ABOUTME: Execution context assembly for state script rendering
// ABOUTME: Exposes built-in bindings under reserved names and aliases, then applies caller overrides

use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::functions::FunctionRegistry;

pub const SALT: &str = "__salt__";
pub const GRAINS: &str = "__grains__";
pub const PILLAR: &str = "__pillar__";
pub const OPTS: &str = "__opts__";
pub const ENV: &str = "__env__";
pub const SLS: &str = "__sls__";

/// Reserved binding names paired with their short aliases.
pub const RESERVED_BINDINGS: [(&str, &str); 6] = [
    (SALT, "salt"),
    (GRAINS, "grains"),
    (PILLAR, "pillar"),
    (OPTS, "opts"),
    (ENV, "saltenv"),
    (SLS, "sls"),
];

/// A named value visible to an executing script.
#[derive(Debug, Clone)]
pub enum Binding {
    Functions(Arc<FunctionRegistry>),
    Data(Arc<Value>),
    Text(String),
}

impl Binding {
    pub fn as_functions(&self) -> Option<&Arc<FunctionRegistry>> {
        match self {
            Binding::Functions(functions) => Some(functions),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&Value> {
        match self {
            Binding::Data(data) => Some(&**data),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Binding::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// True when both bindings refer to the same underlying object.
    pub fn same_object(&self, other: &Binding) -> bool {
        match (self, other) {
            (Binding::Functions(a), Binding::Functions(b)) => Arc::ptr_eq(a, b),
            (Binding::Data(a), Binding::Data(b)) => Arc::ptr_eq(a, b),
            (Binding::Text(a), Binding::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Value> for Binding {
    fn from(value: Value) -> Self {
        Binding::Data(Arc::new(value))
    }
}

impl From<String> for Binding {
    fn from(text: String) -> Self {
        Binding::Text(text)
    }
}

impl From<&str> for Binding {
    fn from(text: &str) -> Self {
        Binding::Text(text.to_string())
    }
}

impl From<Arc<FunctionRegistry>> for Binding {
    fn from(functions: Arc<FunctionRegistry>) -> Self {
        Binding::Functions(functions)
    }
}

/// The full set of bindings visible to one script execution.
///
/// Built fresh for every render and never shared between renders.
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    bindings: HashMap<String, Binding>,
}

impl ExecutionContext {
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bindings.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Effective environment id, as seen by the script.
    pub fn saltenv(&self) -> Option<&str> {
        self.get(ENV).and_then(Binding::as_text)
    }

    /// Effective script id, as seen by the script.
    pub fn sls(&self) -> Option<&str> {
        self.get(SLS).and_then(Binding::as_text)
    }

    fn bind(&mut self, (reserved, alias): (&str, &str), binding: Binding) {
        self.bindings.insert(alias.to_string(), binding.clone());
        self.bindings.insert(reserved.to_string(), binding);
    }
}

/// Assembles an [`ExecutionContext`] from shared inputs and per-render overrides.
///
/// The registry, grains, pillar and opts are only ever cloned as `Arc`s; the
/// builder never mutates them.
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    functions: Arc<FunctionRegistry>,
    grains: Arc<Value>,
    pillar: Arc<Value>,
    opts: Arc<Value>,
    saltenv: String,
    sls: String,
    overrides: BTreeMap<String, Binding>,
}

impl ContextBuilder {
    pub fn new(
        functions: Arc<FunctionRegistry>,
        grains: Arc<Value>,
        pillar: Arc<Value>,
        opts: Arc<Value>,
    ) -> Self {
        Self {
            functions,
            grains,
            pillar,
            opts,
            saltenv: "base".to_string(),
            sls: String::new(),
            overrides: BTreeMap::new(),
        }
    }

    pub fn saltenv(mut self, saltenv: impl Into<String>) -> Self {
        self.saltenv = saltenv.into();
        self
    }

    pub fn sls(mut self, sls: impl Into<String>) -> Self {
        self.sls = sls.into();
        self
    }

    pub fn with_override(mut self, name: impl Into<String>, binding: impl Into<Binding>) -> Self {
        self.overrides.insert(name.into(), binding.into());
        self
    }

    pub fn with_overrides<I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (String, Binding)>,
    {
        self.overrides.extend(overrides);
        self
    }

    pub fn build(self) -> ExecutionContext {
        let mut context = ExecutionContext::default();
        let [salt, grains, pillar, opts, env, sls] = RESERVED_BINDINGS;

        context.bind(salt, Binding::Functions(self.functions));
        context.bind(grains, Binding::Data(self.grains));
        context.bind(pillar, Binding::Data(self.pillar));
        context.bind(opts, Binding::Data(self.opts));
        context.bind(env, Binding::Text(self.saltenv));
        context.bind(sls, Binding::Text(self.sls));

        // Overrides go last so they win over any built-in name
        context.bindings.extend(self.overrides);

        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn builder() -> ContextBuilder {
        ContextBuilder::new(
            Arc::new(FunctionRegistry::new()),
            Arc::new(json!({"os": "Ubuntu"})),
            Arc::new(json!({"AWS_ACCESS_KEY_ID": "key"})),
            Arc::new(json!({"file_root": "/srv/salt"})),
        )
    }

    #[test]
    fn test_builtin_bindings_and_aliases() {
        let context = builder().build();

        assert_eq!(context.len(), 12);
        for (reserved, alias) in RESERVED_BINDINGS {
            let a = context.get(reserved).unwrap();
            let b = context.get(alias).unwrap();
            assert!(a.same_object(b), "{} and {} differ", reserved, alias);
        }
        assert_eq!(context.saltenv(), Some("base"));
        assert_eq!(context.sls(), Some(""));
    }

    #[test]
    fn test_aliases_share_inputs() {
        let functions = Arc::new(FunctionRegistry::new());
        let grains = Arc::new(json!({"os": "Debian"}));
        let context = ContextBuilder::new(
            functions.clone(),
            grains.clone(),
            Arc::new(json!({})),
            Arc::new(json!({})),
        )
        .build();

        assert!(Arc::ptr_eq(
            context.get("salt").unwrap().as_functions().unwrap(),
            &functions
        ));
        assert!(context
            .get(GRAINS)
            .unwrap()
            .same_object(&Binding::Data(grains)));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let context = builder()
            .saltenv("prod")
            .sls("web.nginx")
            .with_override("saltenv", "dev")
            .with_override(GRAINS, json!({"os": "Arch"}))
            .with_override("site_name", "example.org")
            .build();

        assert_eq!(context.get("saltenv").unwrap().as_text(), Some("dev"));
        assert_eq!(context.saltenv(), Some("prod"));
        assert_eq!(context.sls(), Some("web.nginx"));
        assert_eq!(
            context.get(GRAINS).unwrap().as_data(),
            Some(&json!({"os": "Arch"}))
        );
        assert_eq!(
            context.get("grains").unwrap().as_data(),
            Some(&json!({"os": "Ubuntu"}))
        );
        assert_eq!(
            context.get("site_name").unwrap().as_text(),
            Some("example.org")
        );
    }

    #[test]
    fn test_contexts_are_independent() {
        let base = builder();
        let first = base.clone().with_override("extra", "one").build();
        let second = base.build();

        assert!(first.contains("extra"));
        assert!(!second.contains("extra"));
    }
}
