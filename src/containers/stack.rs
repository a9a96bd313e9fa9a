//! Array-backed stack
//!
//! Push, pop and peek all touch only the top of the backing `Vec`, so each
//! operation is a single-step engine. Popping or peeking an empty stack is a
//! domain outcome: the engine narrates it and reports `None`.

use crate::checkpoint::{Checkpoint, Trace};
use crate::engine::{transition, Engine, EngineState, Progress};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    items: Vec<i64>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a stack without producing any checkpoints; the last value ends on top
    pub fn from_values(values: &[i64]) -> Self {
        Stack {
            items: values.to_vec(),
        }
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Values from bottom to top
    pub fn values(&self) -> &[i64] {
        &self.items
    }

    pub fn push(&mut self, value: i64) -> StackPush<'_> {
        StackPush {
            stack: self,
            value,
            state: EngineState::Idle,
            done: false,
        }
    }

    pub fn pop(&mut self) -> StackPop<'_> {
        StackPop {
            stack: self,
            popped: None,
            state: EngineState::Idle,
            done: false,
        }
    }

    pub fn peek(&self) -> StackPeek<'_> {
        StackPeek {
            stack: self,
            top: None,
            state: EngineState::Idle,
            done: false,
        }
    }
}

/// Single-step push returned by [`Stack::push`]
pub struct StackPush<'a> {
    stack: &'a mut Stack,
    value: i64,
    state: EngineState,
    done: bool,
}

impl Engine for StackPush<'_> {
    fn name(&self) -> &'static str {
        "stack push"
    }

    fn state(&self) -> EngineState {
        self.state
    }

    fn step(&mut self, trace: &mut Trace) -> Progress {
        if self.done {
            return Progress::Complete;
        }
        self.done = true;
        transition(self.name(), &mut self.state, EngineState::Running);

        let depth = self.stack.items.len();
        self.stack.items.push(self.value);
        trace.explain(format!("Pushing {} on top of the stack.", self.value));
        trace.checkpoint(Checkpoint::StackPushed {
            depth,
            value: self.value,
        });

        transition(self.name(), &mut self.state, EngineState::Idle);
        Progress::Complete
    }
}

/// Single-step pop returned by [`Stack::pop`]
pub struct StackPop<'a> {
    stack: &'a mut Stack,
    popped: Option<i64>,
    state: EngineState,
    done: bool,
}

impl StackPop<'_> {
    /// The removed value; `None` if the stack was empty
    pub fn popped(&self) -> Option<i64> {
        self.popped
    }
}

impl Engine for StackPop<'_> {
    fn name(&self) -> &'static str {
        "stack pop"
    }

    fn state(&self) -> EngineState {
        self.state
    }

    fn step(&mut self, trace: &mut Trace) -> Progress {
        if self.done {
            return Progress::Complete;
        }
        self.done = true;
        transition(self.name(), &mut self.state, EngineState::Running);

        match self.stack.items.pop() {
            Some(value) => {
                let depth = self.stack.items.len();
                self.popped = Some(value);
                trace.explain(format!("Popping {} off the top of the stack.", value));
                trace.checkpoint(Checkpoint::StackPopped { depth, value });
            }
            None => trace.explain("The stack is empty, there is nothing to pop."),
        }

        transition(self.name(), &mut self.state, EngineState::Idle);
        Progress::Complete
    }
}

/// Single-step peek returned by [`Stack::peek`]
pub struct StackPeek<'a> {
    stack: &'a Stack,
    top: Option<i64>,
    state: EngineState,
    done: bool,
}

impl StackPeek<'_> {
    /// The top value; `None` if the stack was empty
    pub fn top(&self) -> Option<i64> {
        self.top
    }
}

impl Engine for StackPeek<'_> {
    fn name(&self) -> &'static str {
        "stack peek"
    }

    fn state(&self) -> EngineState {
        self.state
    }

    fn step(&mut self, trace: &mut Trace) -> Progress {
        if self.done {
            return Progress::Complete;
        }
        self.done = true;
        transition(self.name(), &mut self.state, EngineState::Running);

        match self.stack.items.last() {
            Some(&value) => {
                let depth = self.stack.items.len() - 1;
                self.top = Some(value);
                trace.explain(format!("The top of the stack is {}.", value));
                trace.checkpoint(Checkpoint::StackPeeked { depth, value });
            }
            None => trace.explain("The stack is empty, there is nothing to peek at."),
        }

        transition(self.name(), &mut self.state, EngineState::Idle);
        Progress::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_reports_depth() {
        let mut stack = Stack::from_values(&[1, 2]);
        let trace = stack.push(3).run_to_end();
        assert_eq!(
            trace.checkpoints().collect::<Vec<_>>(),
            vec![&Checkpoint::StackPushed { depth: 2, value: 3 }]
        );
        assert_eq!(stack.values(), &[1, 2, 3]);
    }

    #[test]
    fn test_pop_empty_is_not_an_error() {
        let mut stack = Stack::new();
        let mut pop = stack.pop();
        let trace = pop.run_to_end();
        assert_eq!(pop.popped(), None);
        assert_eq!(trace.checkpoints().count(), 0);
        assert_eq!(trace.len(), 1, "empty pop still narrates");
    }

    #[test]
    fn test_peek_leaves_stack_untouched() {
        let stack = Stack::from_values(&[4, 9]);
        let mut peek = stack.peek();
        peek.run_to_end();
        assert_eq!(peek.top(), Some(9));
        assert_eq!(stack.size(), 2);
    }

    #[test]
    fn test_second_step_is_a_no_op() {
        let mut stack = Stack::new();
        let mut push = stack.push(1);
        let mut trace = Trace::new();
        assert_eq!(push.step(&mut trace), Progress::Complete);
        let before = trace.len();
        assert_eq!(push.step(&mut trace), Progress::Complete);
        assert_eq!(trace.len(), before);
        drop(push);
        assert_eq!(stack.size(), 1);
    }
}
