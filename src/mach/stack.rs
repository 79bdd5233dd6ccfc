use super::{Fault, FaultCode};

type Result<T> = std::result::Result<T, Fault>;

/// ## Stack enforced and size limited vector

#[derive(Clone)]
pub struct Stack<T> {
    overflow: FaultCode,
    underflow: FaultCode,
    max_len: usize,
    vec: Vec<T>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.vec)
    }
}

impl<T> Stack<T> {
    pub fn new(max_len: usize, overflow: FaultCode, underflow: FaultCode) -> Stack<T> {
        Stack {
            overflow,
            underflow,
            max_len,
            vec: vec![],
        }
    }
    pub fn clear(&mut self) {
        self.vec.clear()
    }
    pub fn len(&self) -> usize {
        self.vec.len()
    }
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }
    pub fn last(&self) -> Option<&T> {
        self.vec.last()
    }
    pub fn last_mut(&mut self) -> Result<&mut T> {
        let underflow = self.underflow;
        self.vec.last_mut().ok_or_else(|| Fault::new(underflow))
    }
    pub fn push(&mut self, val: T) -> Result<()> {
        if self.vec.len() >= self.max_len {
            return Err(Fault::new(self.overflow));
        }
        self.vec.push(val);
        Ok(())
    }
    pub fn pop(&mut self) -> Result<T> {
        match self.vec.pop() {
            Some(v) => Ok(v),
            None => Err(Fault::new(self.underflow)),
        }
    }
    pub fn pop_2(&mut self) -> Result<(T, T)> {
        let two = self.pop()?;
        let one = self.pop()?;
        Ok((one, two))
    }
}
