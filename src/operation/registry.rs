//! Operation Registry
//!
//! Categories of operations, each operation pairing its display metadata and
//! parameter descriptors with an invocation function bound to one client.

use super::catalog;
use super::params::Param;
use crate::api::{AdminClient, AdminError, Result};
use futures::future::BoxFuture;
use futures::FutureExt;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Outcome of an invocation: the parsed JSON result, or `None` for null
pub type InvokeResult = Result<Option<Value>>;

pub type InvokeFn = Arc<dyn Fn(Args) -> BoxFuture<'static, InvokeResult> + Send + Sync>;

/// Positional arguments handed to an operation.
///
/// `Null`, an empty string, an empty list or a missing position all mean
/// "not supplied".
#[derive(Debug, Clone)]
pub struct Args {
    values: Vec<Value>,
    labels: Vec<&'static str>,
}

impl Args {
    pub fn new(values: Vec<Value>, labels: Vec<&'static str>) -> Self {
        Self { values, labels }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    fn label(&self, index: usize) -> &'static str {
        self.labels.get(index).copied().unwrap_or("argument")
    }

    /// Text form of a supplied value
    pub fn text(&self, index: usize) -> Option<String> {
        self.values.get(index).and_then(value_text)
    }

    pub fn required_text(&self, index: usize) -> Result<String> {
        self.text(index)
            .ok_or_else(|| AdminError::validation(format!("{} is required", self.label(index))))
    }

    /// Non-negative integer value of a supplied number or numeric string
    pub fn number(&self, index: usize) -> Result<Option<u64>> {
        let invalid = || AdminError::validation(format!("{} must be a whole number", self.label(index)));

        match self.values.get(index) {
            Some(Value::Number(n)) => n.as_u64().map(Some).ok_or_else(invalid),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => s.trim().parse().map(Some).map_err(|_| invalid()),
            Some(value) if !is_supplied(value) => Ok(None),
            None => Ok(None),
            Some(_) => Err(invalid()),
        }
    }
}

/// Whether a positional value counts as supplied
pub fn is_supplied(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => items.iter().any(is_supplied),
        _ => true,
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => items.iter().find_map(value_text),
        _ => None,
    }
}

/// One administrative action
#[derive(Clone, Serialize)]
pub struct Operation {
    pub name: &'static str,
    pub description: &'static str,
    pub params: Vec<Param>,
    #[serde(skip)]
    invoke: InvokeFn,
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl Operation {
    pub fn new<F, Fut>(
        name: &'static str,
        description: &'static str,
        params: Vec<Param>,
        invoke: F,
    ) -> Self
    where
        F: Fn(Args) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = InvokeResult> + Send + 'static,
    {
        Self {
            name,
            description,
            params,
            invoke: Arc::new(move |args| invoke(args).boxed()),
        }
    }

    /// Invoke with values in the declared parameter order
    pub fn invoke(&self, values: Vec<Value>) -> BoxFuture<'static, InvokeResult> {
        let labels = self.params.iter().map(|p| p.label).collect();
        (self.invoke)(Args::new(values, labels))
    }

    /// Labels of required parameters that have no supplied value.
    ///
    /// Consumers check this before invoking; `invoke` does not.
    pub fn missing_required(&self, values: &[Value]) -> Vec<&'static str> {
        self.params
            .iter()
            .enumerate()
            .filter(|(i, p)| p.required() && !values.get(*i).map(is_supplied).unwrap_or(false))
            .map(|(_, p)| p.label)
            .collect()
    }
}

/// A named group of related operations
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub name: &'static str,
    pub operations: Vec<Operation>,
}

impl Category {
    pub fn new(name: &'static str, operations: Vec<Operation>) -> Self {
        Self { name, operations }
    }

    pub fn operation(&self, name: &str) -> Option<&Operation> {
        self.operations.iter().find(|op| op.name == name)
    }
}

/// All categories, in declaration order. Built once and never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct Registry {
    categories: Vec<Category>,
}

impl Registry {
    /// Build the registry around a client; every operation shares it
    pub fn new(client: AdminClient) -> Self {
        Self {
            categories: catalog::categories(Arc::new(client)),
        }
    }

    /// Build the registry with the default HTTP transport
    pub fn connect(base_url: &str, auth_token: &str) -> Result<Self> {
        Ok(Self::new(AdminClient::new(base_url, auth_token)?))
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn operation(&self, category: &str, name: &str) -> Option<&Operation> {
        self.category(category)?.operation(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::params::TextKind;
    use serde_json::json;

    fn args(values: Vec<Value>) -> Args {
        Args::new(values, vec!["Project ID", "Storage (in bytes)"])
    }

    #[test]
    fn test_text_treats_blank_as_unsupplied() {
        let args = args(vec![json!(""), Value::Null]);
        assert_eq!(args.text(0), None);
        assert_eq!(args.text(1), None);
        assert_eq!(args.text(5), None);
    }

    #[test]
    fn test_text_of_numbers_and_lists() {
        let args = args(vec![json!(42), json!(["", "EU"])]);
        assert_eq!(args.text(0).as_deref(), Some("42"));
        assert_eq!(args.text(1).as_deref(), Some("EU"));
    }

    #[test]
    fn test_required_text_names_the_label() {
        let err = args(vec![]).required_text(0).unwrap_err();
        assert_eq!(err.message(), "Project ID is required");
    }

    #[test]
    fn test_number_accepts_numbers_and_numeric_strings() {
        let args = args(vec![json!(" 1024 "), json!(7)]);
        assert_eq!(args.number(0).unwrap(), Some(1024));
        assert_eq!(args.number(1).unwrap(), Some(7));
        assert_eq!(args.number(2).unwrap(), None);
    }

    #[test]
    fn test_number_rejects_garbage() {
        let err = args(vec![json!("p"), json!("ten")]).number(1).unwrap_err();
        assert_eq!(err.message(), "Storage (in bytes) must be a whole number");

        let err = args(vec![json!(1.5)]).number(0).unwrap_err();
        assert!(matches!(err, AdminError::Validation(_)));

        let err = args(vec![json!(-1)]).number(0).unwrap_err();
        assert!(matches!(err, AdminError::Validation(_)));
    }

    #[test]
    fn test_number_accepts_full_byte_range() {
        let args = args(vec![json!(u64::MAX), json!("18446744073709551615")]);
        assert_eq!(args.number(0).unwrap(), Some(u64::MAX));
        assert_eq!(args.number(1).unwrap(), Some(u64::MAX));
    }

    #[test]
    fn test_missing_required_lists_labels_in_order() {
        let op = Operation::new(
            "update",
            "Update something",
            vec![
                Param::text("Project ID", TextKind::Text, true),
                Param::text("Description", TextKind::Text, false),
                Param::text("Project Name", TextKind::Text, true),
            ],
            |_args| async { InvokeResult::Ok(None) },
        );

        assert_eq!(
            op.missing_required(&[json!(""), json!("d")]),
            vec!["Project ID", "Project Name"]
        );
        assert!(op.missing_required(&[json!("p"), Value::Null, json!("n")]).is_empty());
    }

    #[test]
    fn test_invoke_passes_values_positionally() {
        let op = Operation::new(
            "echo",
            "Echo the second argument",
            vec![
                Param::text("first", TextKind::Text, true),
                Param::text("second", TextKind::Number, true),
            ],
            |args: Args| async move {
                let n = args.number(1)?;
                InvokeResult::Ok(Some(json!(n)))
            },
        );

        let result = tokio_test::block_on(op.invoke(vec![json!("a"), json!("12")])).unwrap();
        assert_eq!(result, Some(json!(12)));
    }
}
