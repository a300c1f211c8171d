//! Documented tuning constants for scroll motion synthesis.
//!
//! These values are tuned for wheel-style scrolling on typical desktop
//! content, where one unit action moves the viewport by one notch.

// ============================================================================
// Unit Action Geometry
// ============================================================================

/// Nominal displacement of one unit action, in pixels.
///
/// **Rationale**: Desktop environments conventionally map one wheel notch to
/// three lines of text, which lands near 120 px at common font sizes and
/// display scales. Browsers and toolkits also report wheel deltas in
/// multiples of 120, so distances divide into unit counts without a
/// platform-specific correction.
pub const DEFAULT_UNIT_SIZE_PX: f64 = 120.0;

// ============================================================================
// Natural-Mode Discretization
// ============================================================================

/// Inclusive bounds for the natural planner's drawn step count.
///
/// **Rationale**: Below ~25 steps the half-cosine envelope degenerates into
/// visibly chunky bursts; above ~70 the per-step unit counts collapse toward
/// zero and the stream spends most of its budget sleeping. Drawing the count
/// uniformly from this band also keeps consecutive scrolls from sharing a
/// step signature.
pub const MIN_STEP_COUNT: u32 = 25;
pub const MAX_STEP_COUNT: u32 = 70;

/// Multiplier band applied to each step's base wait.
///
/// **Rationale**: A fixed per-step wait reads as a metronome. Scaling each
/// wait by an independent uniform draw in [0.5, 1.5] keeps the mean realized
/// duration on target while decorrelating adjacent inter-step gaps. The
/// band is deliberately not re-normalized afterward; the realized total is
/// an unbiased approximation of the requested duration, not an exact match.
pub const WAIT_JITTER_MIN: f64 = 0.5;
pub const WAIT_JITTER_MAX: f64 = 1.5;

// ============================================================================
// Pause Injection
// ============================================================================

/// Short hesitation: chance per executed step and duration bounds.
///
/// **Rationale**: Readers stutter mid-scroll every few steps for a fraction
/// of a second. 0.3 probability with a 0.3 to 1.2 s draw yields roughly one
/// hesitation per three steps without stalling the scroll overall.
pub const SHORT_PAUSE_CHANCE: f64 = 0.3;
pub const SHORT_PAUSE_MIN_SECS: f64 = 0.3;
pub const SHORT_PAUSE_MAX_SECS: f64 = 1.2;

/// Long look-away: chance per executed step and duration bounds.
///
/// **Rationale**: Multi-second breaks are rare but load-bearing for an
/// organic cadence; one roughly every ten steps, lasting 2 to 5 s, matches
/// the feel of someone glancing at another window.
pub const LONG_PAUSE_CHANCE: f64 = 0.1;
pub const LONG_PAUSE_MIN_SECS: f64 = 2.0;
pub const LONG_PAUSE_MAX_SECS: f64 = 5.0;

// ============================================================================
// Bulk-Mode Discretization
// ============================================================================

/// Units issued per bulk step.
///
/// **Rationale**: 15 units per burst is the smallest granularity the
/// underlying injection primitives accept reliably without coalescing or
/// dropping events; larger bursts save little once per-step overhead is
/// amortized.
pub const BULK_CHUNK_UNITS: u32 = 15;

/// Lower bound on a bulk plan's total duration, in seconds.
///
/// At very small distances the rate formula would produce a zero-length
/// busy loop; 0.05 s keeps at least one scheduling quantum between bursts.
pub const BULK_MIN_DURATION_SECS: f64 = 0.05;

// ============================================================================
// Coverage Policy
// ============================================================================

/// Fraction of the region height targeted on a normal iteration.
///
/// **Rationale**: Scrolling 95% of the viewport advances nearly a full page
/// while keeping a sliver of the previous content visible, the way people
/// keep their reading anchor. 100% would produce a perfectly periodic
/// full-page pattern.
pub const FULL_COVERAGE: f64 = 0.95;

/// Chance an iteration scrolls only part of the page, and the fraction
/// range drawn when it does.
pub const PARTIAL_COVERAGE_CHANCE: f64 = 0.15;
pub const PARTIAL_COVERAGE_MIN: f64 = 0.5;
pub const PARTIAL_COVERAGE_MAX: f64 = 0.9;

// ============================================================================
// Session Pacing
// ============================================================================

/// Range the per-iteration scroll duration is drawn from, in seconds.
pub const SCROLL_DURATION_MIN_SECS: f64 = 0.3;
pub const SCROLL_DURATION_MAX_SECS: f64 = 3.0;

/// Range of the idle wait between iterations, in seconds.
///
/// **Rationale**: After landing on a new page a reader settles for several
/// seconds before moving again; 3 to 8 s spans skimming and actual reading
/// without making the session appear stalled.
pub const IDLE_WAIT_MIN_SECS: f64 = 3.0;
pub const IDLE_WAIT_MAX_SECS: f64 = 8.0;

/// Duration of the pointer glide to the region center at session start.
pub const CENTER_GLIDE_SECS: f64 = 0.3;
