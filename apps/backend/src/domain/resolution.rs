//! Round resolution arithmetic.
//!
//! Everything here is total and side-effect free: the service layer loads
//! moves, obtains draws from a [`RandomSource`](super::RandomSource), and
//! hands both to [`aggregate`] and [`compose_public_results`].

/// Lower bound (inclusive) of the per-resolution assistant factor.
pub const ASSISTANT_FACTOR_MIN: f64 = 0.7;
/// Upper bound (exclusive) of the per-resolution assistant factor.
pub const ASSISTANT_FACTOR_MAX: f64 = 1.3;
/// Public sentiment moves by at most this many points either way.
pub const SENTIMENT_BOUND: i32 = 10;
/// Policy quality gained per unit of resources.
pub const POLICY_PER_RESOURCE: f64 = 0.1;

/// The quantities of one submitted move that feed resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveInput {
    pub assistants_allocated: u32,
    pub resources: u32,
}

impl MoveInput {
    pub fn new(assistants_allocated: u32, resources: u32) -> Self {
        Self {
            assistants_allocated,
            resources,
        }
    }
}

/// Random values drawn once per resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolutionDraws {
    /// In `[0.7, 1.3)`
    pub assistant_factor: f64,
    /// In `[-10, 10]`
    pub public_sentiment_delta: i32,
}

impl ResolutionDraws {
    /// Map two samples from `[0, 1)` onto the draw ranges.
    ///
    /// Sentiment is `round(u * 20 - 10)` with halves rounding toward
    /// positive infinity. Out-of-range samples are clamped.
    pub fn from_unit(u_factor: f64, u_sentiment: f64) -> Self {
        let u_factor = clamp_unit(u_factor);
        let u_sentiment = clamp_unit(u_sentiment);

        let assistant_factor = (ASSISTANT_FACTOR_MIN
            + u_factor * (ASSISTANT_FACTOR_MAX - ASSISTANT_FACTOR_MIN))
            .min(ASSISTANT_FACTOR_MAX - f64::EPSILON);

        let span = f64::from(2 * SENTIMENT_BOUND);
        let raw = u_sentiment * span - f64::from(SENTIMENT_BOUND);
        let public_sentiment_delta =
            ((raw + 0.5).floor() as i32).clamp(-SENTIMENT_BOUND, SENTIMENT_BOUND);

        Self {
            assistant_factor,
            public_sentiment_delta,
        }
    }
}

fn clamp_unit(u: f64) -> f64 {
    if u.is_nan() {
        0.0
    } else {
        u.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// Names of the hidden (DM-only) values a resolution records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HiddenVariable {
    StakeholderInfluenceDelta,
    PublicSentimentDelta,
    PolicyQualityDelta,
}

impl HiddenVariable {
    pub const ALL: [HiddenVariable; 3] = [
        HiddenVariable::StakeholderInfluenceDelta,
        HiddenVariable::PublicSentimentDelta,
        HiddenVariable::PolicyQualityDelta,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HiddenVariable::StakeholderInfluenceDelta => "StakeholderInfluenceDelta",
            HiddenVariable::PublicSentimentDelta => "PublicSentimentDelta",
            HiddenVariable::PolicyQualityDelta => "PolicyQualityDelta",
        }
    }
}

/// Outcome of aggregating one round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundDeltas {
    pub stakeholder_influence: f64,
    pub public_sentiment: i32,
    pub policy_quality: f64,
}

impl RoundDeltas {
    /// The three hidden-state rows, one per variable.
    pub fn entries(&self) -> [(HiddenVariable, f64); 3] {
        [
            (
                HiddenVariable::StakeholderInfluenceDelta,
                self.stakeholder_influence,
            ),
            (
                HiddenVariable::PublicSentimentDelta,
                f64::from(self.public_sentiment),
            ),
            (HiddenVariable::PolicyQualityDelta, self.policy_quality),
        ]
    }
}

/// Aggregate a round's moves under the given draws.
///
/// Quantities are summed as integers before scaling, so the result does not
/// depend on move order.
pub fn aggregate(moves: &[MoveInput], draws: ResolutionDraws) -> RoundDeltas {
    let (assistants, resources) = moves.iter().fold((0u64, 0u64), |(a, r), m| {
        (
            a + u64::from(m.assistants_allocated),
            r + u64::from(m.resources),
        )
    });

    RoundDeltas {
        stakeholder_influence: assistants as f64 * draws.assistant_factor,
        public_sentiment: draws.public_sentiment_delta,
        policy_quality: resources as f64 * POLICY_PER_RESOURCE,
    }
}

/// Player-visible narrative for a resolved round.
pub fn compose_public_results(deltas: &RoundDeltas) -> String {
    let direction = if deltas.public_sentiment >= 0 {
        "improved"
    } else {
        "declined"
    };

    format!(
        "Stakeholder influence changed by {:.1}. Public sentiment {} by {}. Policy quality changed by {:.1}.",
        deltas.stakeholder_influence,
        direction,
        deltas.public_sentiment.unsigned_abs(),
        deltas.policy_quality,
    )
}
