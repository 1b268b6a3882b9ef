
#[derive(Clone, Debug)]
enum Op<T> {
    Push,
    Pop(T),
}

/*
 * A stack that records every push and pop since the last commit
 * point, so that a sequence of operations can be undone as a unit.
 *
 * Cloning copies both the contents and the pending log: a clone
 * never observes the operations applied to the original.
 */
#[derive(Clone, Debug)]
pub struct TxStack<T> {
    items: Vec<T>,
    log: Vec<Op<T>>,
}

impl<T: Clone> TxStack<T> {
    pub fn new() -> TxStack<T> {
        TxStack {
            items: Vec::new(),
            log: Vec::new(),
        }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.log.push(Op::Push);
    }

    pub fn pop(&mut self) -> Option<T> {
        let item = self.items.pop()?;
        self.log.push(Op::Pop(item.clone()));
        Some(item)
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    /// Keeps the current contents and forgets the log.
    pub fn commit(&mut self) {
        self.log.clear();
    }

    /// Undoes every operation since the last commit.
    pub fn rollback(&mut self) {
        while let Some(op) = self.log.pop() {
            match op {
                Op::Push => {
                    self.items.pop();
                },
                Op::Pop(item) => self.items.push(item),
            }
        }
    }

    /// Number of operations since the last commit.
    pub fn pending(&self) -> usize {
        self.log.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bottom to top.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: Clone> Default for TxStack<T> {
    fn default() -> Self {
        TxStack::new()
    }
}
