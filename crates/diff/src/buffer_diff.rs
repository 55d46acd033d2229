use ropey::Rope;
use similar::ChangeTag;

use crate::config::DiffConfig;
use crate::diff_fragment::DiffFragment;
use crate::error::DiffError;
use crate::text_range::TextRange;

/// Represents a diff between two buffers (text documents)
#[derive(Debug, Clone)]
pub struct BufferDiff {
    /// The old version of the text
    old_text: Rope,

    /// The new version of the text
    new_text: Rope,

    /// Ordered fragments covering both texts without gaps
    fragments: Vec<DiffFragment>,
}

/// An immutable snapshot of a buffer diff
#[derive(Debug, Clone)]
pub struct BufferDiffSnapshot {
    /// The fragments in this diff
    pub fragments: Vec<DiffFragment>,

    /// The number of chars in the old text
    pub old_len: usize,

    /// The number of chars in the new text
    pub new_len: usize,
}

/// Coalesces a stream of diff tokens into fragments
#[derive(Default)]
struct FragmentBuilder {
    fragments: Vec<DiffFragment>,
    old_pos: usize,
    new_pos: usize,
    pending: Option<(bool, usize, usize)>,
}

impl FragmentBuilder {
    fn push(&mut self, equal: bool, old_len: usize, new_len: usize) {
        if let Some((pending_equal, old, new)) = &mut self.pending {
            if *pending_equal == equal {
                *old += old_len;
                *new += new_len;
                return;
            }
        }
        self.flush();
        self.pending = Some((equal, old_len, new_len));
    }

    fn flush(&mut self) {
        let Some((equal, old_len, new_len)) = self.pending.take() else {
            return;
        };
        let old_range = TextRange::from_len(self.old_pos, old_len);
        let new_range = TextRange::from_len(self.new_pos, new_len);
        self.old_pos = old_range.end;
        self.new_pos = new_range.end;

        if equal {
            self.fragments.push(DiffFragment::equal(old_range, new_range));
        } else {
            self.fragments.push(DiffFragment::changed(old_range, new_range));
        }
    }

    fn finish(mut self) -> Vec<DiffFragment> {
        self.flush();
        self.fragments
    }
}

impl BufferDiff {
    /// Create a new buffer diff between two texts using the default configuration
    pub fn new(old_text: &str, new_text: &str) -> Result<Self, DiffError> {
        Self::with_config(old_text, new_text, &DiffConfig::default())
    }

    /// Create a new buffer diff between two texts
    pub fn with_config(
        old_text: &str,
        new_text: &str,
        config: &DiffConfig,
    ) -> Result<Self, DiffError> {
        config.check_size(old_text)?;
        config.check_size(new_text)?;

        let fragments = Self::compute_fragments(old_text, new_text, config);

        Ok(Self {
            old_text: Rope::from_str(old_text),
            new_text: Rope::from_str(new_text),
            fragments,
        })
    }

    /// Compute the fragments between the old and new text
    fn compute_fragments(old_text: &str, new_text: &str, config: &DiffConfig) -> Vec<DiffFragment> {
        // Fast path: identical texts are a single unchanged fragment
        if old_text == new_text {
            let len = old_text.chars().count();
            if len == 0 {
                return Vec::new();
            }
            return vec![DiffFragment::equal(
                TextRange::new(0, len),
                TextRange::new(0, len),
            )];
        }

        let diff = config.text_diff(old_text, new_text);
        let mut builder = FragmentBuilder::default();

        for change in diff.iter_all_changes() {
            let len = change.value().chars().count();
            match change.tag() {
                ChangeTag::Equal => builder.push(true, len, len),
                ChangeTag::Delete => builder.push(false, len, 0),
                ChangeTag::Insert => builder.push(false, 0, len),
            }
        }

        builder.finish()
    }

    /// Get a snapshot of the current diff
    pub fn snapshot(&self) -> BufferDiffSnapshot {
        BufferDiffSnapshot {
            fragments: self.fragments.clone(),
            old_len: self.old_text.len_chars(),
            new_len: self.new_text.len_chars(),
        }
    }

    /// Get the old text
    pub fn old_text(&self) -> &Rope {
        &self.old_text
    }

    /// Get the new text
    pub fn new_text(&self) -> &Rope {
        &self.new_text
    }

    /// Get the fragments
    pub fn fragments(&self) -> &[DiffFragment] {
        &self.fragments
    }

    /// Get the number of fragments
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Get a fragment by index
    pub fn fragment(&self, index: usize) -> Option<&DiffFragment> {
        self.fragments.get(index)
    }
}

impl BufferDiffSnapshot {
    /// Create a new empty diff snapshot
    pub fn empty() -> Self {
        Self {
            fragments: Vec::new(),
            old_len: 0,
            new_len: 0,
        }
    }

    /// Get the fragments
    pub fn fragments(&self) -> &[DiffFragment] {
        &self.fragments
    }

    /// Get the number of fragments
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Get a fragment by index
    pub fn fragment(&self, index: usize) -> Option<&DiffFragment> {
        self.fragments.get(index)
    }

    /// Check if the diff has any changes
    pub fn has_changes(&self) -> bool {
        self.fragments.iter().any(|f| f.has_changes())
    }

    /// Get the number of changed fragments
    pub fn changed_fragments(&self) -> usize {
        self.fragments.iter().filter(|f| f.has_changes()).count()
    }

    /// Get the number of chars only present in the new text
    pub fn inserted_chars(&self) -> usize {
        self.fragments
            .iter()
            .filter(|f| f.has_changes())
            .map(|f| f.new_range.len())
            .sum()
    }

    /// Get the number of chars only present in the old text
    pub fn deleted_chars(&self) -> usize {
        self.fragments
            .iter()
            .filter(|f| f.has_changes())
            .map(|f| f.old_range.len())
            .sum()
    }
}
