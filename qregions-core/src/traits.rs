use crate::models::Position;

/// Access to the variant record being annotated.
///
/// The annotation engine only needs the reference span of a record and a way to attach (or
/// clear) the region annotation; everything else about the record format stays with the
/// implementor.
pub trait VariantRecord {
    /// Chromosome name of the record.
    fn chrom(&self) -> &str;

    /// Reference span covered by the record, zero-based with both ends inclusive.
    fn ref_span(&self) -> (Position, Position);

    /// Attach the comma-joined region labels, or remove the annotation with `None`.
    fn set_regions(&mut self, regions: Option<&str>);
}
