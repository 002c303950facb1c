//! Run state for the judge-a-photo pipeline.

/// State threaded through the argue graph.
///
/// Each node overlays its own fields on the state it receives: `vision`
/// writes the image description, `historian`/`vibe` their commentary
/// (plus the parsed `vibe_score`), `treasurer` the verdict and the
/// `payout_approved` flag, `payout` the settlement result. Fields written
/// upstream stay visible to every later node.
///
/// Satisfies `Clone + Send + Sync + 'static` for `Node<LociState>` and
/// `StateGraph<LociState>`.
#[derive(Debug, Clone, Default)]
pub struct LociState {
    /// Path of the photo under judgment (caller input).
    pub image: String,
    /// Destination wallet address for an approved payout (caller input).
    pub wallet: String,
    /// Image description from the vision provider.
    pub vision: String,
    /// Cultural-context commentary.
    pub historian: String,
    /// Vibe assessment text.
    pub vibe: String,
    /// Numeric vibe score (0–100) parsed from the assessment.
    pub vibe_score: Option<u32>,
    /// Treasurer verdict text.
    pub treasurer: String,
    /// Settlement result: tx hash, simulated hash, or "Not approved".
    pub payout: String,
    /// Whether the treasurer approved the payout.
    pub payout_approved: bool,
}

impl LociState {
    /// Initial state for one run: the photo and the destination wallet.
    pub fn new(image: impl Into<String>, wallet: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            wallet: wallet.into(),
            ..Self::default()
        }
    }
}
