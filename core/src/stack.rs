use crate::constants::STACK_CAPACITY;
use crate::error::MachineError;

/// # Call Stack
/// A fixed-capacity stack of subroutine return addresses.
///
/// - pushing onto a full stack is an overflow
/// - popping an empty stack yields `None`; it's up to the caller to decide
///   whether that is fatal
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CallStack {
    addresses: [u16; STACK_CAPACITY],
    sp: usize,
}

impl CallStack {
    pub fn new() -> Self {
        CallStack {
            addresses: [0; STACK_CAPACITY],
            sp: 0,
        }
    }

    pub fn push(&mut self, address: u16) -> Result<(), MachineError> {
        if self.is_full() {
            return Err(MachineError::StackOverflow {
                capacity: STACK_CAPACITY,
            });
        }
        self.addresses[self.sp] = address;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Option<u16> {
        if self.is_empty() {
            return None;
        }
        self.sp -= 1;
        Some(self.addresses[self.sp])
    }

    /// Number of return addresses currently held
    pub fn len(&self) -> usize {
        self.sp
    }

    pub fn is_empty(&self) -> bool {
        self.sp == 0
    }

    pub fn is_full(&self) -> bool {
        self.sp == STACK_CAPACITY
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_in_reverse_order() {
        let mut stack = CallStack::new();
        stack.push(0x202).unwrap();
        stack.push(0x304).unwrap();
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.pop(), Some(0x304));
        assert_eq!(stack.pop(), Some(0x202));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_pop_empty_is_none() {
        let mut stack = CallStack::new();
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.len(), 0);
    }

    #[test]
    fn test_holds_exactly_capacity() {
        let mut stack = CallStack::new();
        for address in 0..STACK_CAPACITY as u16 {
            stack.push(address).unwrap();
        }
        assert!(stack.is_full());
        assert_eq!(
            stack.push(0xFFF),
            Err(MachineError::StackOverflow { capacity: 16 })
        );
        // The failed push leaves the stack untouched
        assert_eq!(stack.len(), STACK_CAPACITY);
        assert_eq!(stack.pop(), Some(STACK_CAPACITY as u16 - 1));
    }
}
