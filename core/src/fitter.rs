//! Two-phase width fitting.
//!
//! When the rendered components are wider than the window, components are
//! visited in ascending priority (declared order breaks ties). The first
//! pass swaps in each component's short form where that is narrower; the
//! second hides `truncate_hide` components outright. Both stop as soon as
//! the line fits. Whatever overflow remains after that is left to the host.

use tracing::trace;

use crate::component::Component;
use crate::component::ComponentIndex;

/// A component's rendering for the current redraw.
#[derive(Debug, Clone)]
pub struct ComponentWrapper<'a> {
    pub component: &'a Component,
    pub rendered: String,
    pub width: usize,
    pub index: ComponentIndex,
}

/// Fit `wrappers` into `budget` display cells, rewriting them in place, and
/// return the resulting total width.
///
/// `shorten` renders a component's short form and measures it. It is only
/// called for components that declare a `short_provider`.
pub fn fit<'a, F>(wrappers: &mut [ComponentWrapper<'a>], budget: usize, mut shorten: F) -> usize
where
    F: FnMut(&ComponentWrapper<'a>) -> (String, usize),
{
    let mut total: usize = wrappers.iter().map(|wrapper| wrapper.width).sum();
    if total <= budget {
        return total;
    }

    // Computed keys are read once so the order can't shift mid-fit.
    let priorities: Vec<i32> = wrappers
        .iter()
        .map(|wrapper| wrapper.component.priority.get())
        .collect();
    let hideable: Vec<bool> = wrappers
        .iter()
        .map(|wrapper| wrapper.component.truncate_hide.get())
        .collect();
    let mut order: Vec<usize> = (0..wrappers.len()).collect();
    order.sort_by_key(|&i| priorities[i]);

    for &i in &order {
        if total <= budget {
            return total;
        }
        let wrapper = &mut wrappers[i];
        if wrapper.component.short_provider.is_none() {
            continue;
        }
        let (rendered, width) = shorten(wrapper);
        if width < wrapper.width {
            trace!(index = %wrapper.index, from = wrapper.width, to = width, "shortened component");
            total -= wrapper.width - width;
            wrapper.rendered = rendered;
            wrapper.width = width;
        }
    }

    for &i in &order {
        if total <= budget {
            return total;
        }
        let wrapper = &mut wrappers[i];
        if !hideable[i] || wrapper.width == 0 {
            continue;
        }
        trace!(index = %wrapper.index, width = wrapper.width, "hid component");
        total -= wrapper.width;
        wrapper.rendered.clear();
        wrapper.width = 0;
    }

    if total > budget {
        trace!(total, budget, "statusline still overflows");
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Long forms render as `x` repeated to the given width.
    fn wrappers<'a>(components: &'a [(Component, usize)]) -> Vec<ComponentWrapper<'a>> {
        components
            .iter()
            .enumerate()
            .map(|(i, (component, width))| ComponentWrapper {
                component,
                rendered: "x".repeat(*width),
                width: *width,
                index: ComponentIndex {
                    section: 0,
                    component: i,
                },
            })
            .collect()
    }

    /// A component whose short form is `width` cells wide.
    fn short(width: usize) -> Component {
        Component::new("long").with_short_provider(width.to_string())
    }

    fn shorten(wrapper: &ComponentWrapper<'_>) -> (String, usize) {
        let width = match wrapper.component.short_provider.as_ref() {
            Some(crate::provider::Provider::Named(width)) => width.parse().unwrap(),
            _ => unreachable!("only called for short providers"),
        };
        ("s".repeat(width), width)
    }

    fn widths(wrappers: &[ComponentWrapper<'_>]) -> Vec<usize> {
        wrappers.iter().map(|wrapper| wrapper.width).collect()
    }

    #[test]
    fn fitting_line_is_untouched() {
        let components = [(short(1), 5), (short(1), 5)];
        let mut list = wrappers(&components);
        let total = fit(&mut list, 10, |_| panic!("nothing to shorten"));
        assert_eq!(total, 10);
        assert_eq!(widths(&list), vec![5, 5]);
    }

    #[test]
    fn lower_priority_degrades_first() {
        let components = [
            (short(6).with_priority(1), 10),
            (short(8).with_priority(0), 10),
        ];
        let mut list = wrappers(&components);

        let total = fit(&mut list, 16, shorten);

        assert_eq!(total, 14);
        assert_eq!(widths(&list), vec![6, 8]);
        assert_eq!(list[0].rendered, "ssssss");
        assert_eq!(list[1].rendered, "ssssssss");
    }

    #[test]
    fn stops_as_soon_as_it_fits() {
        let components = [(short(2), 10), (short(2), 10)];
        let mut list = wrappers(&components);

        let total = fit(&mut list, 15, shorten);

        assert_eq!(total, 12);
        assert_eq!(widths(&list), vec![2, 10]);
    }

    #[test]
    fn wider_short_form_is_ignored() {
        let components = [(short(12), 10), (Component::new("a"), 10)];
        let mut list = wrappers(&components);

        let total = fit(&mut list, 5, shorten);

        assert_eq!(total, 20);
        assert_eq!(list[0].rendered, "x".repeat(10));
    }

    #[test]
    fn hides_only_truncate_hide_in_priority_order() {
        let components = [
            (Component::new("a").with_priority(5).truncate_hide(), 10),
            (Component::new("b").with_priority(-1), 10),
            (Component::new("c").with_priority(2).truncate_hide(), 10),
            (Component::new("d").with_priority(3).truncate_hide(), 10),
        ];
        let mut list = wrappers(&components);

        let total = fit(&mut list, 30, shorten);

        assert_eq!(total, 30);
        assert_eq!(widths(&list), vec![10, 10, 0, 10]);
        assert_eq!(list[2].rendered, "");
    }

    #[test]
    fn residual_overflow_is_accepted() {
        let components = [(Component::new("a"), 30), (short(20).truncate_hide(), 10)];
        let mut list = wrappers(&components);

        let total = fit(&mut list, 5, shorten);

        assert_eq!(total, 30);
        assert_eq!(widths(&list), vec![30, 0]);
    }

    #[test]
    fn ties_keep_declared_order() {
        let components = [(short(5), 10), (short(5), 10), (short(5), 10)];
        let mut list = wrappers(&components);

        fit(&mut list, 25, shorten);

        assert_eq!(widths(&list), vec![5, 10, 10]);
    }

    #[test]
    fn computed_priorities_are_read_once_per_fit() {
        use crate::deferred::Deferred;
        use std::sync::Arc;
        use std::sync::atomic::AtomicUsize;
        use std::sync::atomic::Ordering;

        let reads = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&reads);
        let components = [
            (Component::new("a").with_priority(0), 10),
            (
                short(2).with_priority(Deferred::computed(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    -1
                })),
                10,
            ),
            (
                Component::new("c").with_truncate_hide(Deferred::computed(|| true)),
                10,
            ),
        ];
        let mut list = wrappers(&components);

        let total = fit(&mut list, 12, shorten);

        assert_eq!(total, 12);
        assert_eq!(widths(&list), vec![10, 2, 0]);
        assert_eq!(reads.load(Ordering::SeqCst), 1);
    }
}
