//! Active-adapter selection for hosts that expose adapter records
//! (Windows) instead of `ifconfig` text.
//!
//! # Decision Order
//!
//! 1. No candidates: nothing to select.
//! 2. One candidate: its first eligible IPv4 address. Metric and device id
//!    are not read; they may legitimately be unset.
//! 3. Several candidates: drop those without an eligible IPv4 address, then
//!    keep the lowest connection metric. Dropping happens first, so an
//!    IPv6-only adapter never wins on metric.
//! 4. Metric ties: the adapter that appears earliest in the binding order wins.
//!    Adapters not present in it rank last.
//! 5. Anything still tied: enumeration order.

use std::net::Ipv4Addr;

use super::select::first_eligible_ipv4;
use super::{AdapterRecord, BindingOrder, BindingOrderSource};

/// A candidate that survived the IPv4 filter, with the data read so far.
struct Measured<'a, R> {
    record: &'a R,
    address: Ipv4Addr,
    metric: u32,
}

/// Selects the IPv4 address of the active adapter.
///
/// `bindings` is consulted only when two or more adapters tie on metric.
///
/// # Examples
///
/// ```
/// use host_ipv4::network::{AdapterCandidate, BindingOrder, select_adapter_address};
///
/// let candidates = vec![
///     AdapterCandidate::new(vec!["12.123.12.12".into()]).with_connection_metric(10),
///     AdapterCandidate::new(vec!["12.123.12.13".into()]).with_connection_metric(5),
/// ];
///
/// let selected = select_adapter_address(&candidates, &BindingOrder::default());
/// assert_eq!(selected, Some("12.123.12.13".parse().unwrap()));
/// ```
#[must_use]
pub fn select_adapter_address<R, B>(candidates: &[R], bindings: &B) -> Option<Ipv4Addr>
where
    R: AdapterRecord,
    B: BindingOrderSource + ?Sized,
{
    match candidates {
        [] => {
            tracing::debug!("No adapter candidates");
            None
        }
        [only] => first_eligible_ipv4(only.ip_addresses()),
        _ => select_among(candidates, bindings),
    }
}

fn select_among<R, B>(candidates: &[R], bindings: &B) -> Option<Ipv4Addr>
where
    R: AdapterRecord,
    B: BindingOrderSource + ?Sized,
{
    let measured: Vec<Measured<'_, R>> = candidates
        .iter()
        .filter_map(|record| {
            let address = first_eligible_ipv4(record.ip_addresses())?;
            match record.connection_metric() {
                Ok(metric) => Some(Measured {
                    record,
                    address,
                    metric,
                }),
                Err(e) => {
                    tracing::warn!("Ignoring adapter with address {address}: {e}");
                    None
                }
            }
        })
        .collect();

    let best_metric = measured.iter().map(|m| m.metric).min()?;
    let tied: Vec<Measured<'_, R>> = measured
        .into_iter()
        .filter(|m| m.metric == best_metric)
        .collect();

    if let [winner] = tied.as_slice() {
        return Some(winner.address);
    }

    tracing::debug!(
        "{} adapters share metric {best_metric}, consulting binding order",
        tied.len()
    );
    break_tie_by_binding_order(&tied, bindings)
}

fn break_tie_by_binding_order<R, B>(tied: &[Measured<'_, R>], bindings: &B) -> Option<Ipv4Addr>
where
    R: AdapterRecord,
    B: BindingOrderSource + ?Sized,
{
    let order = bindings.ordered_bindings().unwrap_or_else(|e| {
        tracing::warn!("Binding order unavailable, using enumeration order: {e}");
        BindingOrder::default()
    });

    // min_by_key keeps the first of equal keys, which gives enumeration order.
    tied.iter()
        .min_by_key(|m| binding_rank(m.record, &order))
        .map(|m| m.address)
}

/// Position in the binding order; unknown or unreadable ids rank last.
fn binding_rank<R: AdapterRecord>(record: &R, order: &BindingOrder) -> usize {
    match record.device_id() {
        Ok(id) => order.position_of(id).unwrap_or(usize::MAX),
        Err(e) => {
            tracing::warn!("Adapter ranked last in binding order: {e}");
            usize::MAX
        }
    }
}

#[cfg(test)]
#[path = "adapter_select_tests.rs"]
mod tests;
