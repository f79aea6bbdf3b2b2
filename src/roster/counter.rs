/// Visible and online peer counts for a group or account row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter {
    pub total: usize,
    pub online: usize,
}

impl Counter {
    pub fn inc(&mut self, total: bool, online: bool) {
        if total {
            self.total += 1;
        }
        if online {
            self.online += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_are_independent() {
        let mut c = Counter::default();
        c.inc(true, true);
        c.inc(true, false);
        c.inc(false, true);
        c.inc(false, false);
        assert_eq!(c, Counter { total: 2, online: 2 });
    }
}
