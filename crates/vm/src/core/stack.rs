/// The [`CallStack`] struct holds the return addresses pushed by `CALL`.
/// It is a LIFO structure; the last element is the top of the stack.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct CallStack {
    /// Saved program counter values, oldest first.
    pub stack: Vec<u8>,
}

impl CallStack {
    /// Creates a new, empty [`CallStack`].
    ///
    /// ```
    /// use regvm_vm::core::stack::CallStack;
    ///
    /// let stack = CallStack::new();
    /// assert!(stack.is_empty());
    /// ```
    pub fn new() -> CallStack {
        CallStack { stack: Vec::new() }
    }

    /// Push a return address onto the stack.
    ///
    /// ```
    /// use regvm_vm::core::stack::CallStack;
    ///
    /// let mut stack = CallStack::new();
    /// stack.push(0x05);
    /// assert_eq!(stack.size(), 1);
    /// assert_eq!(stack.pop(), Some(0x05));
    /// ```
    pub fn push(&mut self, address: u8) {
        self.stack.push(address);
    }

    /// Pop the most recent return address, or `None` if the stack is empty.
    pub fn pop(&mut self) -> Option<u8> {
        self.stack.pop()
    }

    /// Gets the number of unmatched calls on the stack.
    pub fn size(&self) -> usize {
        self.stack.len()
    }

    /// Check if the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Removes every frame from the stack.
    pub fn clear(&mut self) {
        self.stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use crate::core::stack::CallStack;

    #[test]
    fn test_push_pop() {
        let mut stack = CallStack::new();
        stack.push(1);
        stack.push(2);
        assert_eq!(stack.pop(), Some(2));
        assert_eq!(stack.pop(), Some(1));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_pop_empty() {
        let mut stack = CallStack::new();
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.size(), 0);
    }

    #[test]
    fn test_deep_nesting() {
        let mut stack = CallStack::new();
        for i in 0..10_000u32 {
            stack.push((i % 256) as u8);
        }
        assert_eq!(stack.size(), 10_000);
        assert_eq!(stack.pop(), Some((9_999 % 256) as u8));
    }

    #[test]
    fn test_clear() {
        let mut stack = CallStack::new();
        stack.push(1);
        stack.clear();
        assert!(stack.is_empty());
    }
}
