/// Item barcodes are opaque strings assigned by the inventory API.
pub type Barcode = String;

/// Stock quantities as reported by the inventory API. Signed because the
/// API does not guarantee non-negative counts.
pub type Quantity = i64;
