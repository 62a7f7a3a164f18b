//! Adapter binding order: the operator-configured adapter priority list.

use serde::{Deserialize, Serialize};

use super::FetchError;

/// Ordered binding entries; a lower index means a higher priority.
///
/// Each entry is an opaque string that embeds a device identifier, e.g.
/// `"\Device\{4AE6B55C-6DD6-427D-A5BB-13535D4BE926}"`. The order is never
/// changed after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingOrder {
    entries: Vec<String>,
}

impl BindingOrder {
    /// Creates a binding order from already-ordered entries.
    #[must_use]
    pub fn new(entries: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the lowest index whose entry contains `device_id`.
    ///
    /// An empty `device_id` is never found.
    ///
    /// # Examples
    ///
    /// ```
    /// use host_ipv4::network::BindingOrder;
    ///
    /// let order = BindingOrder::new([r"\Device\{AAA}", r"\Device\{BBB}"]);
    ///
    /// assert_eq!(order.position_of("{BBB}"), Some(1));
    /// assert_eq!(order.position_of("{CCC}"), None);
    /// ```
    #[must_use]
    pub fn position_of(&self, device_id: &str) -> Option<usize> {
        if device_id.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .position(|entry| entry.contains(device_id))
    }

    /// Returns the entries in priority order.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for BindingOrder {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// A provider of the system's adapter binding order.
///
/// The selector only asks for it when two or more adapters tie on metric.
pub trait BindingOrderSource: Send + Sync {
    /// Returns the current binding order.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the configuration store cannot be read.
    fn ordered_bindings(&self) -> Result<BindingOrder, FetchError>;
}

/// A fixed binding order is its own source.
impl BindingOrderSource for BindingOrder {
    fn ordered_bindings(&self) -> Result<BindingOrder, FetchError> {
        Ok(self.clone())
    }
}

impl<T: BindingOrderSource + ?Sized> BindingOrderSource for &T {
    fn ordered_bindings(&self) -> Result<BindingOrder, FetchError> {
        (*self).ordered_bindings()
    }
}
