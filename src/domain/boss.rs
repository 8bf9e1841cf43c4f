/// Boss challenges: generation and grading.
///
/// A challenge is a single integer-answer question drawn uniformly from
/// five kinds. Grading is pure: the caller hands in the prompt outcome
/// (an answer string, a timeout, or a cancel) and this module never
/// touches the clock — the 10-second deadline is enforced by the prompt
/// that collects the answer.

use std::time::Duration;

use rand::Rng;

/// How long the prompt stays open before resolving as a failure.
pub const ANSWER_WINDOW: Duration = Duration::from_secs(10);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ChallengeKind {
    Addition,
    Multiplication,
    Logarithm,
    TrianglePerimeter,
    RightTriangleArea,
}

#[derive(Clone, Debug)]
pub struct Challenge {
    pub kind: ChallengeKind,
    pub question: String,
    answer: i64,
}

/// Outcome of the boss prompt, as observed by the UI.
/// Everything but a correct Answered grades as a failure.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum BossAnswer {
    Answered(String),
    TimedOut,
    Cancelled,
}

/// Draw one challenge, uniform over the five kinds.
pub fn generate<R: Rng>(rng: &mut R) -> Challenge {
    match rng.gen_range(0..5) {
        0 => {
            let a: i64 = rng.gen_range(10..=59);
            let b: i64 = rng.gen_range(10..=59);
            Challenge {
                kind: ChallengeKind::Addition,
                question: format!("{} + {} = ?", a, b),
                answer: a + b,
            }
        }
        1 => {
            let a: i64 = rng.gen_range(3..=14);
            let b: i64 = rng.gen_range(3..=14);
            Challenge {
                kind: ChallengeKind::Multiplication,
                question: format!("{} x {} = ?", a, b),
                answer: a * b,
            }
        }
        2 => {
            let base: i64 = if rng.gen_bool(0.5) { 2 } else { 10 };
            let exp: u32 = rng.gen_range(1..=4);
            let value = base.pow(exp);
            Challenge {
                kind: ChallengeKind::Logarithm,
                question: format!("log{}({}) = ?", base, value),
                answer: exp as i64,
            }
        }
        3 => {
            let a: i64 = rng.gen_range(3..=8);
            let b: i64 = rng.gen_range(3..=8);
            let c: i64 = rng.gen_range(3..=8);
            Challenge {
                kind: ChallengeKind::TrianglePerimeter,
                question: format!("Perimeter of a triangle with sides {}, {}, {} = ?", a, b, c),
                answer: a + b + c,
            }
        }
        _ => {
            let base: i64 = rng.gen_range(4..=11);
            let height: i64 = rng.gen_range(4..=11);
            Challenge {
                kind: ChallengeKind::RightTriangleArea,
                question: format!("Area of a right triangle, base {} height {} = ?", base, height),
                answer: base * height / 2,
            }
        }
    }
}

impl Challenge {
    /// Exact integer comparison. Unparseable input is a wrong answer,
    /// not an error; timeouts and cancels always fail.
    pub fn grade(&self, outcome: &BossAnswer) -> bool {
        match outcome {
            BossAnswer::Answered(text) => match text.trim().parse::<i64>() {
                Ok(given) => given == self.answer,
                Err(_) => false,
            },
            BossAnswer::TimedOut | BossAnswer::Cancelled => false,
        }
    }

    #[cfg(test)]
    pub fn answer(&self) -> i64 {
        self.answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn operands_stay_in_kind_ranges() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..500 {
            let c = generate(&mut rng);
            match c.kind {
                ChallengeKind::Addition => assert!((20..=118).contains(&c.answer)),
                ChallengeKind::Multiplication => assert!((9..=196).contains(&c.answer)),
                ChallengeKind::Logarithm => assert!((1..=4).contains(&c.answer)),
                ChallengeKind::TrianglePerimeter => assert!((9..=24).contains(&c.answer)),
                ChallengeKind::RightTriangleArea => assert!((8..=60).contains(&c.answer)),
            }
            assert!(c.question.ends_with("= ?"));
        }
    }

    #[test]
    fn all_kinds_eventually_drawn() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(generate(&mut rng).kind as u8);
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn grading_is_exact_integer_match() {
        let mut rng = SmallRng::seed_from_u64(9);
        let c = generate(&mut rng);
        assert!(c.grade(&BossAnswer::Answered(format!("  {} ", c.answer()))));
        assert!(!c.grade(&BossAnswer::Answered(format!("{}", c.answer() + 1))));
    }

    #[test]
    fn non_numeric_timeout_and_cancel_all_fail() {
        let mut rng = SmallRng::seed_from_u64(9);
        let c = generate(&mut rng);
        assert!(!c.grade(&BossAnswer::Answered("twelve".into())));
        assert!(!c.grade(&BossAnswer::Answered(String::new())));
        assert!(!c.grade(&BossAnswer::TimedOut));
        assert!(!c.grade(&BossAnswer::Cancelled));
    }

    #[test]
    fn log_answer_is_the_exponent() {
        let mut rng = SmallRng::seed_from_u64(0);
        let c = (0..500)
            .map(|_| generate(&mut rng))
            .find(|c| c.kind == ChallengeKind::Logarithm)
            .expect("no logarithm drawn in 500 tries");
        // question shows base^exp; the expected answer is exp
        assert!((1..=4).contains(&c.answer()));
    }
}
