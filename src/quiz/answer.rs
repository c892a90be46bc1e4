//! Target count and answer choice generation

use std::collections::VecDeque;

use rand::Rng;

use crate::consts::ANSWER_SPREAD;

/// Draw the number of dots for a question.
///
/// Uniform in `[difficulty - ANSWER_SPREAD, difficulty + ANSWER_SPREAD)`,
/// then clamped into the inclusive `range`.
pub fn generate_answer<R: Rng>(rng: &mut R, difficulty: i32, range: (i32, i32)) -> i32 {
    let (min, max) = range;
    let low = difficulty.saturating_sub(ANSWER_SPREAD);
    let high = difficulty.saturating_add(ANSWER_SPREAD);
    let t = rng.random_range(low..high);
    t.max(min).min(max)
}

/// Build `num_choices` consecutive integers containing `answer`.
///
/// The answer lands at a random position. If that pushes the run below 1,
/// the window slides right one step at a time until every value is
/// positive; the answer keeps its value but may change position.
pub fn generate_choices<R: Rng>(rng: &mut R, answer: i32, num_choices: usize) -> Vec<i32> {
    if num_choices == 0 {
        return Vec::new();
    }

    let idx = rng.random_range(0..num_choices);
    let first = i32::try_from(idx)
        .ok()
        .and_then(|idx| answer.checked_sub(idx))
        .unwrap_or(1);
    // Runs that would pass i32::MAX come out short; validated settings never get there
    let mut choices: VecDeque<i32> = std::iter::successors(Some(first), |c| c.checked_add(1))
        .take(num_choices)
        .collect();

    while choices.front().is_some_and(|&first| first <= 0) {
        let Some(next) = choices.back().and_then(|last| last.checked_add(1)) else {
            break;
        };
        choices.pop_front();
        choices.push_back(next);
    }

    choices.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn assert_consecutive(choices: &[i32]) {
        for pair in choices.windows(2) {
            assert_eq!(pair[1], pair[0] + 1, "choices not consecutive: {:?}", choices);
        }
    }

    #[test]
    fn test_answer_stays_in_range() {
        let mut rng = Pcg32::seed_from_u64(12345);
        for _ in 0..10_000 {
            let answer = generate_answer(&mut rng, 8, (4, 20));
            assert!((4..=20).contains(&answer), "out of range: {}", answer);
        }
    }

    #[test]
    fn test_answer_window_is_half_open() {
        // Wide range so clamping never kicks in
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen_low = false;
        for _ in 0..10_000 {
            let answer = generate_answer(&mut rng, 50, (1, 1000));
            assert!((45..55).contains(&answer));
            seen_low |= answer == 45;
        }
        assert!(seen_low);
    }

    #[test]
    fn test_extreme_difficulty_is_clamped() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(generate_answer(&mut rng, -500, (3, 9)), 3);
        assert_eq!(generate_answer(&mut rng, 500, (3, 9)), 9);
        assert_eq!(generate_answer(&mut rng, i32::MAX, (3, 9)), 9);
        assert_eq!(generate_answer(&mut rng, i32::MIN, (3, 9)), 3);
    }

    #[test]
    fn test_small_answer_is_repaired() {
        let mut rng = Pcg32::seed_from_u64(99);
        for _ in 0..1_000 {
            let choices = generate_choices(&mut rng, 2, 5);
            assert_eq!(choices.len(), 5);
            assert!(choices.iter().all(|&c| c > 0), "{:?}", choices);
            assert!(choices.contains(&2));
            assert_consecutive(&choices);
        }
    }

    #[test]
    fn test_answer_of_one_with_many_choices() {
        let mut rng = Pcg32::seed_from_u64(3);
        let choices = generate_choices(&mut rng, 1, 10);
        assert_eq!(choices, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_answer_position_varies() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let mut positions = [false; 4];
        for _ in 0..200 {
            let choices = generate_choices(&mut rng, 30, 4);
            let pos = choices.iter().position(|&c| c == 30).unwrap();
            positions[pos] = true;
        }
        assert!(positions.iter().all(|&p| p));
    }

    #[test]
    fn test_choices_near_i32_max_do_not_overflow() {
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..100 {
            let choices = generate_choices(&mut rng, i32::MAX, 3);
            assert!(choices.contains(&i32::MAX));
            assert!(choices.iter().all(|&c| c > 0));
            assert_consecutive(&choices);
        }
    }

    proptest! {
        #[test]
        fn answer_always_within_range(
            seed in any::<u64>(),
            difficulty in -1_000i32..1_000,
            min in 1i32..60,
            width in 0i32..60,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let answer = generate_answer(&mut rng, difficulty, (min, min + width));
            prop_assert!(answer >= min && answer <= min + width);
        }

        #[test]
        fn choices_are_positive_consecutive_and_contain_answer(
            seed in any::<u64>(),
            answer in 1i32..200,
            num_choices in 2usize..12,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let choices = generate_choices(&mut rng, answer, num_choices);
            prop_assert_eq!(choices.len(), num_choices);
            prop_assert!(choices.iter().all(|&c| c >= 1));
            prop_assert_eq!(choices.iter().filter(|&&c| c == answer).count(), 1);
            for pair in choices.windows(2) {
                prop_assert_eq!(pair[1], pair[0] + 1);
            }
        }
    }
}
