use shared::{
    domain::{CartLine, LessonId},
    error::CartError,
};
use tracing::{debug, warn};

use crate::catalog::Catalog;

/// Cart lines, one per lesson. Every mutation moves spaces between the cart
/// and the catalog passed in, so `spaces + reserved == capacity` holds for
/// every lesson until the cart is cleared by checkout.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Units of `lesson_id` held across all lines.
    pub fn reserved_for(&self, lesson_id: LessonId) -> u32 {
        self.lines
            .iter()
            .filter(|line| line.lesson_id == lesson_id)
            .map(|line| line.quantity)
            .sum()
    }

    pub fn add(&mut self, catalog: &mut Catalog, lesson_id: LessonId) -> Result<(), CartError> {
        catalog.take_space(lesson_id)?;

        if let Some(line) = self.lines.iter_mut().find(|l| l.lesson_id == lesson_id) {
            line.quantity += 1;
            debug!(lesson_id = lesson_id.0, quantity = line.quantity, "added to existing cart line");
            return Ok(());
        }

        // take_space succeeded, so the lesson exists.
        let Some(lesson) = catalog.get(lesson_id) else {
            return Err(CartError::UnknownLesson { lesson_id });
        };
        self.lines.push(CartLine::from_lesson(lesson));
        debug!(lesson_id = lesson_id.0, lines = self.lines.len(), "created cart line");
        Ok(())
    }

    pub fn increase(&mut self, catalog: &mut Catalog, index: usize) -> Result<(), CartError> {
        let len = self.lines.len();
        let line = self
            .lines
            .get_mut(index)
            .ok_or(CartError::LineOutOfRange { index, len })?;

        catalog.take_space(line.lesson_id)?;
        line.quantity += 1;
        debug!(
            lesson_id = line.lesson_id.0,
            quantity = line.quantity,
            "increased cart line quantity"
        );
        Ok(())
    }

    /// Drops one unit; a line holding a single unit is removed entirely.
    pub fn decrease(&mut self, catalog: &mut Catalog, index: usize) -> Result<(), CartError> {
        let len = self.lines.len();
        let line = self
            .lines
            .get_mut(index)
            .ok_or(CartError::LineOutOfRange { index, len })?;

        if line.quantity <= 1 {
            return self.remove(catalog, index).map(|_| ());
        }

        line.quantity -= 1;
        if !catalog.restore_spaces(line.lesson_id, 1) {
            warn!(
                lesson_id = line.lesson_id.0,
                "cart line references a lesson missing from the catalog; space not restored"
            );
        }
        debug!(
            lesson_id = line.lesson_id.0,
            quantity = line.quantity,
            "decreased cart line quantity"
        );
        Ok(())
    }

    /// Removes the line and returns all of its units to the catalog.
    pub fn remove(&mut self, catalog: &mut Catalog, index: usize) -> Result<CartLine, CartError> {
        if index >= self.lines.len() {
            return Err(CartError::LineOutOfRange {
                index,
                len: self.lines.len(),
            });
        }

        let line = self.lines.remove(index);
        if !catalog.restore_spaces(line.lesson_id, line.quantity) {
            warn!(
                lesson_id = line.lesson_id.0,
                "cart line references a lesson missing from the catalog; spaces not restored"
            );
        }
        debug!(
            lesson_id = line.lesson_id.0,
            restored = line.quantity,
            "removed cart line"
        );
        Ok(line)
    }

    /// Empties the cart without touching the catalog.
    pub fn take_lines(&mut self) -> Vec<CartLine> {
        std::mem::take(&mut self.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::Lesson;

    fn single_lesson_catalog(spaces: u32) -> Catalog {
        Catalog::new(vec![Lesson {
            id: LessonId(42),
            subject: "Latin".to_string(),
            location: "Mill Hill".to_string(),
            price: 40.0,
            spaces,
            icon: String::new(),
            image: "latin.png".to_string(),
        }])
        .expect("catalog")
    }

    #[test]
    fn adding_same_lesson_twice_groups_into_one_line() {
        let mut catalog = single_lesson_catalog(5);
        let mut cart = Cart::default();

        cart.add(&mut catalog, LessonId(42)).expect("first add");
        cart.add(&mut catalog, LessonId(42)).expect("second add");

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.lines()[0].image, "latin.png");
        assert_eq!(catalog.get(LessonId(42)).map(|l| l.spaces), Some(3));
        assert_eq!(cart.total(), 80.0);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn increase_is_rejected_once_lesson_is_sold_out() {
        let mut catalog = single_lesson_catalog(1);
        let mut cart = Cart::default();
        cart.add(&mut catalog, LessonId(42)).expect("add");

        assert_eq!(
            cart.increase(&mut catalog, 0),
            Err(CartError::SoldOut {
                lesson_id: LessonId(42)
            })
        );
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn out_of_range_index_changes_nothing() {
        let mut catalog = single_lesson_catalog(2);
        let mut cart = Cart::default();
        cart.add(&mut catalog, LessonId(42)).expect("add");

        assert_eq!(
            cart.remove(&mut catalog, 3),
            Err(CartError::LineOutOfRange { index: 3, len: 1 })
        );
        assert_eq!(
            cart.decrease(&mut catalog, 1),
            Err(CartError::LineOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(cart.len(), 1);
        assert_eq!(catalog.get(LessonId(42)).map(|l| l.spaces), Some(1));
    }

    #[test]
    fn remove_still_drops_line_when_lesson_is_gone() {
        let mut source = single_lesson_catalog(3);
        let mut cart = Cart::default();
        cart.add(&mut source, LessonId(42)).expect("add");
        cart.add(&mut source, LessonId(42)).expect("add");

        let mut other = Catalog::new(Vec::new()).expect("empty catalog");
        assert_eq!(cart.decrease(&mut other, 0), Ok(()));
        assert_eq!(cart.lines()[0].quantity, 1);

        let removed = cart.remove(&mut other, 0).expect("remove");
        assert_eq!(removed.lesson_id, LessonId(42));
        assert!(cart.is_empty());
    }

    #[test]
    fn increase_against_missing_lesson_is_a_no_op() {
        let mut source = single_lesson_catalog(3);
        let mut cart = Cart::default();
        cart.add(&mut source, LessonId(42)).expect("add");

        let mut other = Catalog::new(Vec::new()).expect("empty catalog");
        assert_eq!(
            cart.increase(&mut other, 0),
            Err(CartError::UnknownLesson {
                lesson_id: LessonId(42)
            })
        );
        assert_eq!(cart.lines()[0].quantity, 1);
    }
}
