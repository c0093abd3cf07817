//! Host-defined context objects.

use std::fmt;
use std::sync::Arc;

use crate::delegate::TemplateDelegate;
use crate::value::Value;

/// A host object that answers keys through its own property access.
///
/// Implementors must be shareable across threads: the same context data may
/// back concurrent renders.
pub trait ContextObject: Send + Sync {
    /// Resolve `key`, or return `None` when the object does not know it.
    fn resolve_key(&self, key: &str) -> Option<Value>;
}

impl<F> ContextObject for F
where
    F: Fn(&str) -> Option<Value> + Send + Sync,
{
    fn resolve_key(&self, key: &str) -> Option<Value> {
        self(key)
    }
}

/// A host object as stored in a `Value`.
///
/// When the object also observes rendering, the same allocation is kept a
/// second time as a delegate, so pushing it onto a runtime's context stack
/// can extend the delegate stack as well.
#[derive(Clone)]
pub struct HostObject {
    object: Arc<dyn ContextObject>,
    delegate: Option<Arc<dyn TemplateDelegate>>,
}

impl HostObject {
    /// Wrap an object that only resolves keys.
    pub fn new<T: ContextObject + 'static>(object: T) -> Self {
        Self {
            object: Arc::new(object),
            delegate: None,
        }
    }

    /// Wrap an object that resolves keys and also acts as a delegate.
    pub fn with_delegate<T>(object: Arc<T>) -> Self
    where
        T: ContextObject + TemplateDelegate + 'static,
    {
        Self {
            object: object.clone(),
            delegate: Some(object),
        }
    }

    pub fn resolve_key(&self, key: &str) -> Option<Value> {
        self.object.resolve_key(key)
    }

    /// The delegate behavior of this object, if it has any.
    pub fn delegate(&self) -> Option<&Arc<dyn TemplateDelegate>> {
        self.delegate.as_ref()
    }

    /// Whether both handles point to the same host object.
    pub fn ptr_eq(&self, other: &HostObject) -> bool {
        Arc::ptr_eq(&self.object, &other.object)
    }
}

impl fmt::Debug for HostObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostObject")
            .field("is_delegate", &self.delegate.is_some())
            .finish_non_exhaustive()
    }
}

impl Value {
    /// Wrap a host object.
    pub fn object<T: ContextObject + 'static>(object: T) -> Self {
        Value::Object(HostObject::new(object))
    }

    /// Wrap a host object that also acts as a delegate.
    pub fn delegating_object<T>(object: Arc<T>) -> Self
    where
        T: ContextObject + TemplateDelegate + 'static,
    {
        Value::Object(HostObject::with_delegate(object))
    }

    /// The delegate carried by this value, if it is a delegating host object.
    pub fn delegate(&self) -> Option<&Arc<dyn TemplateDelegate>> {
        self.as_object().and_then(HostObject::delegate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ResolveKey;

    struct Person {
        name: String,
    }

    impl ContextObject for Person {
        fn resolve_key(&self, key: &str) -> Option<Value> {
            match key {
                "name" => Some(Value::from(self.name.clone())),
                _ => None,
            }
        }
    }

    struct Observer;

    impl ContextObject for Observer {
        fn resolve_key(&self, _key: &str) -> Option<Value> {
            None
        }
    }

    impl TemplateDelegate for Observer {}

    #[test]
    fn test_object_resolves_own_keys() {
        let value = Value::object(Person {
            name: "Alice".to_string(),
        });

        assert_eq!(value.resolve_key("name"), Some(Value::from("Alice")));
        assert_eq!(value.resolve_key("age"), None);
        assert!(value.delegate().is_none());
    }

    #[test]
    fn test_closure_as_object() {
        let value = Value::object(|key: &str| (key == "answer").then(|| Value::Int(42)));

        assert_eq!(value.resolve_key("answer"), Some(Value::Int(42)));
        assert_eq!(value.resolve_key("question"), None);
    }

    #[test]
    fn test_delegating_object() {
        let value = Value::delegating_object(Arc::new(Observer));
        assert!(value.delegate().is_some());
    }

    #[test]
    fn test_object_identity() {
        let value = Value::object(Person {
            name: "Bob".to_string(),
        });
        let copy = value.clone();
        let other = Value::object(Person {
            name: "Bob".to_string(),
        });

        assert_eq!(value, copy);
        assert_ne!(value, other);
    }
}
