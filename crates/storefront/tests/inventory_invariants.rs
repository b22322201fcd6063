use std::time::{Duration, Instant};

use shared::domain::LessonId;
use storefront::{catalog::SEED_CAPACITY, Storefront};

/// Small deterministic generator so the operation mix is reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

fn assert_reservations_balance(store: &Storefront) {
    for lesson in store.lessons() {
        let reserved = store.cart().reserved_for(lesson.id);
        assert_eq!(
            lesson.spaces + reserved,
            store.catalog().capacity(lesson.id).expect("capacity"),
            "lesson {} out of balance",
            lesson.id
        );
    }
}

#[test]
fn reservations_balance_across_random_cart_operations() {
    for seed in [1_u64, 7, 42, 2024] {
        let mut rng = Lcg(seed);
        let mut store = Storefront::seeded();

        for _ in 0..500 {
            let lines = store.cart_lines().len() as u64;
            // indexes can run one past the end to exercise rejected operations
            let index = rng.below(lines + 1) as usize;
            let _ = match rng.below(4) {
                0 => store.add_to_cart(LessonId(rng.below(11) as u32 + 1)),
                1 => store.increase_quantity(index),
                2 => store.decrease_quantity(index),
                _ => store.remove_from_cart(index).map(|_| ()),
            };
            assert_reservations_balance(&store);
            assert!(store.cart_lines().iter().all(|line| line.quantity >= 1));
        }
    }
}

#[test]
fn one_line_per_lesson_and_never_above_capacity() {
    let mut store = Storefront::seeded();
    for _ in 0..(SEED_CAPACITY + 3) {
        let _ = store.add_to_cart(LessonId(8));
        let _ = store.increase_quantity(0);
    }

    assert_eq!(store.cart_lines().len(), 1);
    assert_eq!(store.cart_lines()[0].quantity, SEED_CAPACITY);
    assert_eq!(store.lesson(LessonId(8)).map(|l| l.spaces), Some(0));
    assert_reservations_balance(&store);
}

#[test]
fn checkout_round_trip_leaves_spaces_decremented() {
    let start = Instant::now();
    let mut store = Storefront::new(storefront::Catalog::seeded(), Duration::from_millis(10));
    store.add_to_cart(LessonId(5)).expect("add");
    store.add_to_cart(LessonId(5)).expect("add");
    store.set_name("Grace Hopper");
    store.set_phone("0123456789");

    assert!(store.checkout_at(start).is_confirmed());
    assert_reservations_balance(&store);

    assert!(store.poll_at(start + Duration::from_millis(10)));
    assert!(store.cart_lines().is_empty());
    assert_eq!(store.lesson(LessonId(5)).map(|l| l.spaces), Some(3));
}
