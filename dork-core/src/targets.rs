/// Ordered, duplicate-free list of target domains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetList {
    domains: Vec<String>,
}

impl TargetList {
    /// Append every comma-separated entry of `input` that is non-empty after
    /// trimming and not already present. Returns how many were added.
    pub fn add_batch(&mut self, input: &str) -> usize {
        let before = self.domains.len();
        for domain in input.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            if !self.contains(domain) {
                self.domains.push(domain.to_string());
            }
        }
        self.domains.len() - before
    }

    pub fn remove(&mut self, domain: &str) -> bool {
        let before = self.domains.len();
        self.domains.retain(|d| d != domain);
        self.domains.len() != before
    }

    pub fn clear(&mut self) {
        self.domains.clear();
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.domains.iter().any(|d| d == domain)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.domains
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}
