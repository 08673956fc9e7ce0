use fxhash::FxHashMap as HashMap;

use qregions_core::models::LabelId;
use qregions_io::RegionSpec;

/// Label of the confident-region file. Never split into per-line sub-labels.
pub const CONF_LABEL: &str = "CONF";

/// Joins a base label and a per-line tag into a composite label.
pub const COMPOSITE_SEPARATOR: char = '_';

///
/// Bidirectional map between region label names and dense ids, with the number of bases
/// registered under each label.
///
/// Ids are handed out in first-seen order starting at 0 and are never reused or renumbered.
///
/// # Examples
///
/// ```
/// use qregions::LabelRegistry;
///
/// let mut registry = LabelRegistry::default();
/// let fp = registry.resolve("FP");
/// let conf = registry.resolve("CONF");
/// assert_eq!((fp, conf), (0, 1));
/// assert_eq!(registry.resolve("FP"), fp);
///
/// registry.add_size(fp, 11);
/// assert_eq!(registry.size_of("FP"), 11);
/// assert_eq!(registry.size_of("TP"), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LabelRegistry {
    names: Vec<String>,
    ids: HashMap<String, LabelId>,
    sizes: Vec<u64>,
}

impl LabelRegistry {
    /// Id of `name`, allocating the next id if the name is new.
    pub fn resolve(&mut self, name: &str) -> LabelId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }

        let id = self.names.len() as LabelId;
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        self.sizes.push(0);
        log::debug!("registered region label {name} as {id}");
        id
    }

    /// Id of `name` for a line carrying `tag`: `<name>_<tag>`.
    pub fn resolve_composite(&mut self, name: &str, tag: &str) -> LabelId {
        self.resolve(&composite_label(name, tag))
    }

    pub fn id(&self, name: &str) -> Option<LabelId> {
        self.ids.get(name).copied()
    }

    pub fn name(&self, id: LabelId) -> Option<&str> {
        self.names.get(id as usize).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    /// Add `len` bases to the size of `id`, saturating at `u64::MAX`. Unknown ids are ignored.
    pub fn add_size(&mut self, id: LabelId, len: u64) {
        if let Some(size) = self.sizes.get_mut(id as usize) {
            *size = size.saturating_add(len);
        }
    }

    /// Bases registered under `id`, 0 if the id is unknown.
    pub fn total_size(&self, id: LabelId) -> u64 {
        self.sizes.get(id as usize).copied().unwrap_or(0)
    }

    /// Bases registered under `name`, 0 if the name is unknown.
    pub fn size_of(&self, name: &str) -> u64 {
        self.id(name).map_or(0, |id| self.total_size(id))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// `(id, name)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (LabelId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(id, name)| (id as LabelId, name.as_str()))
    }
}

pub fn composite_label(name: &str, tag: &str) -> String {
    format!("{name}{COMPOSITE_SEPARATOR}{tag}")
}

/// The reserved confident-region label.
pub fn is_reserved_label(name: &str) -> bool {
    name == CONF_LABEL
}

///
/// A fixed label never gets per-line composite sub-labels: either the region spec pinned it
/// explicitly (`=label:path`) or the label is reserved.
///
pub fn is_fixed(spec: &RegionSpec) -> bool {
    spec.pinned || is_reserved_label(&spec.label)
}
