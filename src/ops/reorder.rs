//! Drag reordering over a vertical list.
//!
//! While a row is dragged, every pointer move recomputes where it would land:
//! immediately before the nearest row whose vertical midpoint lies below the
//! pointer, or at the end of the list when no row does. Only the live visual
//! order changes during the drag; the task list is reordered once, on drop,
//! from the final on-screen order.

/// On-screen geometry of one visible row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowBox {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl RowBox {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        RowBox {
            id: id.into(),
            top,
            height,
        }
    }

    pub fn midpoint(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// The row the dragged item should be placed before, or `None` for the end
/// of the list.
pub fn drop_before<'a>(rows: &'a [RowBox], dragged_id: &str, pointer_y: f64) -> Option<&'a str> {
    let mut closest: Option<(f64, &RowBox)> = None;
    for row in rows.iter().filter(|r| r.id != dragged_id) {
        let offset = pointer_y - row.midpoint();
        if offset < 0.0 && closest.is_none_or(|(best, _)| offset > best) {
            closest = Some((offset, row));
        }
    }
    closest.map(|(_, row)| row.id.as_str())
}

/// Move `dragged_id` to sit before `before` (or last). An unknown dragged id
/// leaves the order unchanged.
pub fn place(order: &[String], dragged_id: &str, before: Option<&str>) -> Vec<String> {
    if !order.iter().any(|id| id == dragged_id) {
        return order.to_vec();
    }
    let mut result: Vec<String> = order.iter().filter(|id| *id != dragged_id).cloned().collect();
    let index = before
        .and_then(|b| result.iter().position(|id| id == b))
        .unwrap_or(result.len());
    result.insert(index, dragged_id.to_string());
    result
}

/// An in-progress drag of one row.
#[derive(Debug, Clone)]
pub struct DragSession {
    dragged: String,
    order: Vec<String>,
}

impl DragSession {
    /// Start dragging `dragged` within the current on-screen `order`.
    pub fn start(dragged: impl Into<String>, order: Vec<String>) -> Self {
        DragSession {
            dragged: dragged.into(),
            order,
        }
    }

    pub fn dragged(&self) -> &str {
        &self.dragged
    }

    /// Live visual order
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Handle one pointer move. Returns true when the live order changed.
    ///
    /// `rows` may cover only part of the order (a scrolled view). Past the
    /// last row on screen the dragged row goes right after that row, not to
    /// the end of the whole order.
    pub fn move_to(&mut self, rows: &[RowBox], pointer_y: f64) -> bool {
        let before = match drop_before(rows, &self.dragged, pointer_y) {
            Some(id) => Some(id.to_string()),
            None => self.after_last_row(rows),
        };
        let next = place(&self.order, &self.dragged, before.as_deref());
        if next == self.order {
            return false;
        }
        self.order = next;
        true
    }

    /// The id following the lowest non-dragged row in `rows`, or `None`
    /// when that row is last in the order.
    fn after_last_row(&self, rows: &[RowBox]) -> Option<String> {
        let last = rows
            .iter()
            .filter(|r| r.id != self.dragged)
            .max_by(|a, b| a.top.total_cmp(&b.top))?;
        let mut rest = self.order.iter().filter(|id| **id != self.dragged);
        rest.position(|id| *id == last.id)?;
        rest.next().cloned()
    }

    /// End the drag, yielding the final on-screen order.
    pub fn finish(self) -> Vec<String> {
        self.order
    }

    /// Abandon the drag. The stored order was never touched.
    pub fn cancel(self) {
        tracing::debug!(id = %self.dragged, "drag cancelled");
    }
}
