/// A match candidate for an uploaded query face.
///
/// Placeholder data only: there is no recognition backend yet, so these
/// records are statically defined and unrelated to the uploaded image.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceMatch {
    /// The identity label of the candidate.
    pub label: &'static str,
    /// The match distance (lower is closer).
    pub score: f64,
    /// The gallery file the candidate came from.
    pub source: &'static str,
}

/// A sighting of the query face within an uploaded video, as a timeline
/// entry. Placeholder data, same caveat as [`FaceMatch`].
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineMatch {
    /// The timestamp of the sighting within the video (mm:ss).
    pub time: &'static str,
    /// The identity label of the candidate.
    pub label: &'static str,
    /// The match distance (lower is closer).
    pub score: f64,
}
