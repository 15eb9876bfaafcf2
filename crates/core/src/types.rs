/// CMS document identifiers are opaque strings (`_id`).
pub type DocumentId = String;
