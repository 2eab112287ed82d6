use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

/// Keeps the last `cap` bytes written to it.
///
/// Child output can run to gigabytes over a long shower simulation; only the
/// tail is kept for diagnostics.
#[derive(Debug)]
pub struct RingBytes {
    inner: Mutex<VecDeque<u8>>,
    cap: usize,
}

impl RingBytes {
    pub fn new(cap: usize) -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(VecDeque::with_capacity(cap.min(64 * 1024))),
            cap,
        })
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<u8>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn push(&self, data: &[u8]) {
        if self.cap == 0 {
            return;
        }
        let mut g = self.lock();
        let data = if data.len() > self.cap {
            &data[data.len() - self.cap..]
        } else {
            data
        };
        let overflow = g.len().saturating_add(data.len()).saturating_sub(self.cap);
        if overflow > 0 {
            g.drain(..overflow);
        }
        g.extend(data);
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let g = self.lock();
        let mut vec = Vec::with_capacity(g.len());
        vec.extend(g.iter().copied());
        vec
    }

    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.to_bytes()).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_the_tail() {
        let ring = RingBytes::new(5);
        ring.push(b"abc");
        ring.push(b"defg");
        assert_eq!(ring.to_bytes(), b"cdefg");

        ring.push(b"0123456789");
        assert_eq!(ring.to_string_lossy(), "56789");
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let ring = RingBytes::new(0);
        ring.push(b"ignored");
        assert!(ring.to_bytes().is_empty());
    }
}
