use crate::key::Key;

/// Per-resolution state passed down while a chain of dependencies is built.
#[derive(Clone)]
pub struct CallContext<'a> {
    trace: InjectionTrace<'a>,
}

impl<'a> CallContext<'a> {
    pub fn new(key: &'a Key) -> Self {
        Self {
            trace: InjectionTrace::new(key),
        }
    }

    pub fn append<'b>(&'b self, key: &'b Key) -> CallContext<'b> {
        CallContext {
            trace: self.trace.append(key),
        }
    }

    pub fn key(&self) -> &Key {
        self.trace.key()
    }

    pub fn trace(&self) -> &InjectionTrace<'_> {
        &self.trace
    }
}

/// The chain of keys from the top-level request down to the current one.
#[derive(Clone)]
pub struct InjectionTrace<'a> {
    key: &'a Key,
    previous: Option<&'a InjectionTrace<'a>>,
}

impl<'a> InjectionTrace<'a> {
    pub fn new(key: &'a Key) -> Self {
        Self {
            key,
            previous: None,
        }
    }

    pub fn append<'b>(&'b self, key: &'b Key) -> InjectionTrace<'b> {
        InjectionTrace {
            key,
            previous: Some(self),
        }
    }

    pub fn key(&self) -> &Key {
        self.key
    }

    pub fn previous(&self) -> Option<&InjectionTrace<'a>> {
        self.previous
    }

    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut this = self;
        while let Some(previous) = this.previous() {
            depth += 1;
            this = previous;
        }
        depth
    }

    pub fn previous_exist_key(&self, key: &Key) -> bool {
        let mut this = self;
        while let Some(previous) = this.previous() {
            if previous.key() == key {
                return true;
            }
            this = previous;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injection_trace_previous_exist_key_succeeds() {
        let a = Key::of::<i32>();
        let b = Key::named::<i32>("b");
        let c = Key::of::<u8>();

        let root = CallContext::new(&a);
        let child = root.append(&b);
        let grandchild = child.append(&c);

        assert_eq!(*grandchild.key(), c);
        assert_eq!(grandchild.trace().depth(), 2);
        assert!(grandchild.trace().previous_exist_key(&a));
        assert!(grandchild.trace().previous_exist_key(&b));
        assert!(!grandchild.trace().previous_exist_key(&c));
        assert!(!root.trace().previous_exist_key(&a));
    }
}
