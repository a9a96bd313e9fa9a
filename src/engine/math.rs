//! Number theory engines
//!
//! - [`Sieve`]: sieve of Eratosthenes, one multiple marked per step
//! - [`PrimeFactors`]: trial division building a binary [`FactorTree`]
//! - [`Gcd`]: Euclid's algorithm, one division row per step

use super::constants::{MIN_FACTORABLE, SIEVE_LIMIT};
use super::{transition, Engine, EngineState, Progress};
use crate::checkpoint::{Checkpoint, Trace};
use crate::errors::{VisualizerError, VisualizerResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SievePhase {
    Start,
    Base,
    Marking { value: u64 },
    Advance,
    Finish,
    Done,
}

/// Sieve of Eratosthenes over `2..=n`
#[derive(Debug, Clone)]
pub struct Sieve {
    n: u64,
    num: u64,
    marked: Vec<bool>,
    primes: Vec<u64>,
    phase: SievePhase,
    state: EngineState,
}

impl Sieve {
    pub fn new(n: u64) -> VisualizerResult<Self> {
        if n > SIEVE_LIMIT {
            return Err(VisualizerError::invalid_input(
                "sieve of Eratosthenes",
                format!("{} exceeds the limit of {}", n, SIEVE_LIMIT),
            ));
        }
        Ok(Sieve {
            n,
            num: 2,
            marked: vec![false; n as usize + 1],
            primes: Vec::new(),
            phase: SievePhase::Start,
            state: EngineState::Idle,
        })
    }

    /// Primes up to `n`, available once the engine completes
    pub fn primes(&self) -> &[u64] {
        &self.primes
    }

    pub fn is_marked(&self, value: u64) -> bool {
        self.marked.get(value as usize).copied().unwrap_or(false)
    }

    fn squares_in_range(&self) -> bool {
        self.num * self.num <= self.n
    }
}

impl Engine for Sieve {
    fn name(&self) -> &'static str {
        "sieve of Eratosthenes"
    }

    fn state(&self) -> EngineState {
        self.state
    }

    fn step(&mut self, trace: &mut Trace) -> Progress {
        let n = self.n;
        self.phase = match self.phase {
            SievePhase::Start => {
                transition(self.name(), &mut self.state, EngineState::Running);
                trace.checkpoint(Checkpoint::NumbersLaidOut { upto: n });
                trace.explain(format!("Finding every prime up to {}.", n));
                if self.squares_in_range() {
                    SievePhase::Base
                } else {
                    SievePhase::Finish
                }
            }
            SievePhase::Base => {
                let num = self.num;
                trace.checkpoint(Checkpoint::SieveBase { num });
                trace.explain(format!(
                    "Marking multiples of {} starting at {}\u{b2}.",
                    num, num
                ));
                SievePhase::Marking { value: num * num }
            }
            SievePhase::Marking { value } => {
                self.marked[value as usize] = true;
                trace.checkpoint(Checkpoint::NumberMarked { value });
                trace.explain(format!(
                    "Marking multiples of {} starting at {}\u{b2}. (Current: {})",
                    self.num, self.num, value
                ));
                let next = value + self.num;
                if next <= n {
                    SievePhase::Marking { value: next }
                } else {
                    SievePhase::Advance
                }
            }
            SievePhase::Advance => {
                // an unmarked value exists below num² for every num reached here
                let mut next = self.num + 1;
                while next <= n && self.marked[next as usize] {
                    next += 1;
                }
                self.num = next;
                if self.squares_in_range() {
                    SievePhase::Base
                } else {
                    SievePhase::Finish
                }
            }
            SievePhase::Finish => {
                self.primes = (2..=n).filter(|&v| !self.marked[v as usize]).collect();
                if n < 2 {
                    trace.explain(format!("There are no primes up to {}.", n));
                } else {
                    trace.explain(format!(
                        "{}\u{b2} is {} which is bigger than {}. The unmarked numbers are prime.",
                        self.num,
                        self.num * self.num,
                        n
                    ));
                }
                trace.checkpoint(Checkpoint::PrimesFound {
                    primes: self.primes.clone(),
                });
                SievePhase::Done
            }
            SievePhase::Done => SievePhase::Done,
        };

        if self.phase == SievePhase::Done {
            transition(self.name(), &mut self.state, EngineState::Idle);
            Progress::Complete
        } else {
            Progress::Pending
        }
    }
}

/// Node in a prime decomposition tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorNode {
    pub value: u64,
    /// `(factor leaf, quotient)` once the node has been split
    pub children: Option<(usize, usize)>,
    pub dropped: bool,
}

/// Binary decomposition tree; node 0 is the number being factorised
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactorTree {
    nodes: Vec<FactorNode>,
}

impl FactorTree {
    fn push(&mut self, value: u64) -> usize {
        self.nodes.push(FactorNode {
            value,
            children: None,
            dropped: false,
        });
        self.nodes.len() - 1
    }

    pub fn root(&self) -> Option<&FactorNode> {
        self.nodes.first()
    }

    pub fn node(&self, index: usize) -> Option<&FactorNode> {
        self.nodes.get(index)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Values of the surviving leaves, left to right
    pub fn leaves(&self) -> Vec<u64> {
        let mut out = Vec::new();
        let mut stack = vec![0];
        while let Some(i) = stack.pop() {
            let Some(node) = self.nodes.get(i) else {
                continue;
            };
            match node.children {
                Some((left, right)) => {
                    stack.push(right);
                    stack.push(left);
                }
                None if !node.dropped => out.push(node.value),
                None => {}
            }
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FactorPhase {
    Start,
    Twos,
    Odd { candidate: u64 },
    Finish,
    Done,
}

/// Trial-division factorisation.
///
/// Factors of two are divided out first; after that odd candidates are tried
/// while `candidate² <= remainder`, re-evaluated against the shrinking
/// remainder after every division.
#[derive(Debug, Clone)]
pub struct PrimeFactors {
    n: u64,
    tree: FactorTree,
    current: usize,
    factors: Vec<u64>,
    phase: FactorPhase,
    state: EngineState,
}

impl PrimeFactors {
    pub fn new(n: u64) -> VisualizerResult<Self> {
        if n < MIN_FACTORABLE {
            return Err(VisualizerError::invalid_input(
                "prime factorisation",
                format!("{} has no prime factors", n),
            ));
        }
        Ok(PrimeFactors {
            n,
            tree: FactorTree::default(),
            current: 0,
            factors: Vec::new(),
            phase: FactorPhase::Start,
            state: EngineState::Idle,
        })
    }

    /// Prime factors in non-decreasing order
    pub fn factors(&self) -> &[u64] {
        &self.factors
    }

    pub fn tree(&self) -> &FactorTree {
        &self.tree
    }

    fn remainder(&self) -> u64 {
        self.tree.nodes[self.current].value
    }

    fn split(&mut self, factor: u64, trace: &mut Trace) {
        let node = self.current;
        let quotient = self.remainder() / factor;
        let factor_node = self.tree.push(factor);
        let quotient_node = self.tree.push(quotient);
        self.tree.nodes[node].children = Some((factor_node, quotient_node));
        self.factors.push(factor);
        self.current = quotient_node;

        trace.explain(format!(
            "{} = {} \u{d7} {}",
            self.tree.nodes[node].value, factor, quotient
        ));
        trace.checkpoint(Checkpoint::FactorSplit {
            node,
            factor_node,
            factor,
            quotient_node,
            quotient,
        });
    }
}

impl Engine for PrimeFactors {
    fn name(&self) -> &'static str {
        "prime factorisation"
    }

    fn state(&self) -> EngineState {
        self.state
    }

    fn step(&mut self, trace: &mut Trace) -> Progress {
        self.phase = match self.phase {
            FactorPhase::Start => {
                transition(self.name(), &mut self.state, EngineState::Running);
                self.tree.push(self.n);
                trace.explain(format!("Finding the prime factors of {}.", self.n));
                FactorPhase::Twos
            }
            FactorPhase::Twos => {
                if self.remainder() % 2 == 0 {
                    self.split(2, trace);
                    FactorPhase::Twos
                } else {
                    FactorPhase::Odd { candidate: 3 }
                }
            }
            FactorPhase::Odd { candidate } => {
                let rem = self.remainder();
                if candidate * candidate > rem {
                    trace.explain(format!(
                        "{} > \u{221a}{}, no more candidates to try.",
                        candidate, rem
                    ));
                    FactorPhase::Finish
                } else if rem % candidate == 0 {
                    self.split(candidate, trace);
                    FactorPhase::Odd { candidate }
                } else {
                    FactorPhase::Odd {
                        candidate: candidate + 2,
                    }
                }
            }
            FactorPhase::Finish => {
                let rem = self.remainder();
                let node = self.current;
                if rem > 2 {
                    self.factors.push(rem);
                    trace.explain(format!("{} is prime, so it is the last factor.", rem));
                    trace.checkpoint(Checkpoint::FactorLeaf { node, value: rem });
                } else {
                    self.tree.nodes[node].dropped = true;
                    trace.explain(format!("{} is not a prime factor, dropping it.", rem));
                    trace.checkpoint(Checkpoint::FactorNodeDropped { node });
                }
                FactorPhase::Done
            }
            FactorPhase::Done => FactorPhase::Done,
        };

        if self.phase == FactorPhase::Done {
            transition(self.name(), &mut self.state, EngineState::Idle);
            Progress::Complete
        } else {
            Progress::Pending
        }
    }
}

/// One row of the Euclidean algorithm: `dividend = quotient * divisor + remainder`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GcdRow {
    pub dividend: u64,
    pub divisor: u64,
    pub quotient: u64,
    pub remainder: u64,
}

/// Euclidean greatest common divisor
#[derive(Debug, Clone)]
pub struct Gcd {
    a: u64,
    b: u64,
    n: u64,
    m: u64,
    rows: Vec<GcdRow>,
    result: Option<u64>,
    started: bool,
    state: EngineState,
}

impl Gcd {
    /// Both inputs may not be zero at once
    pub fn new(n: u64, m: u64) -> VisualizerResult<Self> {
        if n == 0 && m == 0 {
            return Err(VisualizerError::invalid_input(
                "Euclidean GCD",
                "gcd(0, 0) is undefined",
            ));
        }
        Ok(Gcd {
            a: n,
            b: m,
            n,
            m,
            rows: Vec::new(),
            result: None,
            started: false,
            state: EngineState::Idle,
        })
    }

    pub fn rows(&self) -> &[GcdRow] {
        &self.rows
    }

    pub fn result(&self) -> Option<u64> {
        self.result
    }

    fn finish(&mut self, value: u64, trace: &mut Trace) -> Progress {
        self.result = Some(value);
        trace.checkpoint(Checkpoint::GcdResult { value });
        transition(self.name(), &mut self.state, EngineState::Idle);
        Progress::Complete
    }
}

impl Engine for Gcd {
    fn name(&self) -> &'static str {
        "Euclidean GCD"
    }

    fn state(&self) -> EngineState {
        self.state
    }

    fn step(&mut self, trace: &mut Trace) -> Progress {
        if self.result.is_some() {
            return Progress::Complete;
        }

        if !self.started {
            self.started = true;
            transition(self.name(), &mut self.state, EngineState::Running);
            if self.m == 0 {
                trace.explain(format!("gcd({}, 0) is {}.", self.n, self.n));
                return self.finish(self.n, trace);
            }
            if self.n % self.m == 0 {
                trace.explain(format!(
                    "{} mod {} = 0 --> {} is the GCD.",
                    self.n, self.m, self.m
                ));
                return self.finish(self.m, trace);
            }
        }

        if self.m == 0 {
            trace.explain(format!("The GCD of {} and {} is {}", self.a, self.b, self.n));
            return self.finish(self.n, trace);
        }

        let row = GcdRow {
            dividend: self.n,
            divisor: self.m,
            quotient: self.n / self.m,
            remainder: self.n % self.m,
        };
        trace.explain(format!(
            "{} = {} \u{d7} {} + {}",
            row.dividend, row.quotient, row.divisor, row.remainder
        ));
        trace.checkpoint(Checkpoint::GcdRow {
            row: self.rows.len(),
            dividend: row.dividend,
            divisor: row.divisor,
            quotient: row.quotient,
            remainder: row.remainder,
        });
        self.rows.push(row);
        self.n = self.m;
        self.m = row.remainder;
        Progress::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sieve_30() {
        let mut sieve = Sieve::new(30).unwrap();
        sieve.run_to_end();
        assert_eq!(sieve.primes(), &[2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert!(sieve.is_marked(25));
        assert!(!sieve.is_marked(29));
    }

    #[test]
    fn test_sieve_marks_start_at_square() {
        let mut sieve = Sieve::new(20).unwrap();
        let trace = sieve.run_to_end();
        let first_marks: Vec<u64> = trace
            .checkpoints()
            .filter_map(|c| match c {
                Checkpoint::NumberMarked { value } => Some(*value),
                _ => None,
            })
            .take(3)
            .collect();
        assert_eq!(first_marks, vec![4, 6, 8]);
        let bases: Vec<u64> = trace
            .checkpoints()
            .filter_map(|c| match c {
                Checkpoint::SieveBase { num } => Some(*num),
                _ => None,
            })
            .collect();
        assert_eq!(bases, vec![2, 3]);
    }

    #[test]
    fn test_sieve_below_two_is_empty() {
        let mut sieve = Sieve::new(1).unwrap();
        sieve.run_to_end();
        assert!(sieve.primes().is_empty());
        assert!(Sieve::new(SIEVE_LIMIT + 1).is_err());
    }

    #[test]
    fn test_factor_360() {
        let mut pf = PrimeFactors::new(360).unwrap();
        pf.run_to_end();
        assert_eq!(pf.factors(), &[2, 2, 2, 3, 3, 5]);
        assert_eq!(pf.tree().leaves(), vec![2, 2, 2, 3, 3, 5]);
    }

    #[test]
    fn test_factor_square_of_prime() {
        let mut pf = PrimeFactors::new(9).unwrap();
        pf.run_to_end();
        assert_eq!(pf.factors(), &[3, 3]);
    }

    #[test]
    fn test_power_of_two_drops_trailing_one() {
        let mut pf = PrimeFactors::new(8).unwrap();
        let trace = pf.run_to_end();
        assert_eq!(pf.factors(), &[2, 2, 2]);
        assert!(trace
            .checkpoints()
            .any(|c| matches!(c, Checkpoint::FactorNodeDropped { .. })));
        assert_eq!(pf.tree().leaves(), vec![2, 2, 2]);
    }

    #[test]
    fn test_factor_rejects_small_input() {
        assert!(PrimeFactors::new(1).is_err());
        assert!(PrimeFactors::new(0).is_err());
    }

    #[test]
    fn test_gcd_rows() {
        let mut gcd = Gcd::new(48, 18).unwrap();
        gcd.run_to_end();
        assert_eq!(gcd.result(), Some(6));
        assert_eq!(
            gcd.rows()
                .iter()
                .map(|r| (r.dividend, r.divisor, r.remainder))
                .collect::<Vec<_>>(),
            vec![(48, 18, 12), (18, 12, 6), (12, 6, 0)]
        );
    }

    #[test]
    fn test_gcd_degenerate_cases() {
        let mut gcd = Gcd::new(17, 5).unwrap();
        gcd.run_to_end();
        assert_eq!(gcd.result(), Some(1));

        let mut gcd = Gcd::new(12, 4).unwrap();
        gcd.run_to_end();
        assert_eq!(gcd.result(), Some(4));
        assert!(gcd.rows().is_empty());

        let mut gcd = Gcd::new(7, 0).unwrap();
        gcd.run_to_end();
        assert_eq!(gcd.result(), Some(7));

        assert!(Gcd::new(0, 0).is_err());
    }
}
