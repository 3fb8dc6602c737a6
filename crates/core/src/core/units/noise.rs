//! Two-dimensional simplex noise.
//!
//! A pure, deterministic `(seed, x, y) -> f64` function backing `op noise`.
//! The lattice is skewed into triangles, each of the three surrounding corners
//! picks one of twelve gradients through an integer hash, and the corner
//! contributions fall off as `t^4` within radius `sqrt(0.5)`. Output lies
//! roughly in `[-1, 1]` and is 0 at every lattice point.

/// Skew factor from input space to the triangular lattice, `(sqrt(3) - 1) / 2`.
const F2: f64 = 0.366_025_403_784_438_6;

/// Unskew factor back to input space, `(3 - sqrt(3)) / 6`.
const G2: f64 = 0.211_324_865_405_187_13;

/// Scale applied to the summed contributions.
const SCALE: f64 = 70.0;

/// Squared radius of a corner's influence.
const RADIUS_SQ: f64 = 0.5;

/// Lattice cells repeat with this period before hashing.
const LATTICE_PERIOD: f64 = 256.0;

/// Multiplier of the integer hash.
const HASH_MULTIPLIER: u128 = 0x045d_9f3b;

/// Divisor folding high bits back into the hash.
const HASH_FOLD: u128 = 0xffff;

/// Gradient directions, indexed by `hash % 12`.
const GRADIENTS: [(f64, f64); 12] = [
    (1.0, 1.0),
    (-1.0, 1.0),
    (1.0, -1.0),
    (-1.0, -1.0),
    (1.0, 0.0),
    (-1.0, 0.0),
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (0.0, 1.0),
    (0.0, -1.0),
];

/// Samples the noise field.
///
/// # Arguments
///
/// * `seed` - Selects an independent noise field.
/// * `x`, `y` - Sample position.
///
/// # Returns
///
/// The noise value; `0.0` for non-finite positions and for positions so
/// large that the skewed lattice overflows.
///
/// # Examples
///
/// ```
/// use mlogvm_core::core::units::noise::noise2d;
///
/// assert_eq!(noise2d(0, 0.0, 0.0), 0.0);
/// assert_eq!(noise2d(0, 1.25, 3.5), noise2d(0, 1.25, 3.5));
/// assert!(noise2d(0, 1.25, 3.5).abs() <= 1.0);
/// ```
pub fn noise2d(seed: u32, x: f64, y: f64) -> f64 {
    if !x.is_finite() || !y.is_finite() {
        return 0.0;
    }

    // Lattice coordinates stay in f64 so huge positions cannot overflow.
    let s = (x + y) * F2;
    let i = (x + s).floor();
    let j = (y + s).floor();
    let t = (i + j) * G2;
    let x0 = x - (i - t);
    let y0 = y - (j - t);

    // Which of the two triangles of the skewed cell holds the point.
    let (i1, j1): (u8, u8) = if x0 > y0 { (1, 0) } else { (0, 1) };

    let x1 = x0 - f64::from(i1) + G2;
    let y1 = y0 - f64::from(j1) + G2;
    let x2 = x0 - 1.0 + 2.0 * G2;
    let y2 = y0 - 1.0 + 2.0 * G2;

    let ii = i.rem_euclid(LATTICE_PERIOD) as u128;
    let jj = j.rem_euclid(LATTICE_PERIOD) as u128;
    let seed = u128::from(seed);

    let g0 = perm(seed, ii + perm(seed, jj));
    let g1 = perm(seed, ii + u128::from(i1) + perm(seed, jj + u128::from(j1)));
    let g2 = perm(seed, ii + 1 + perm(seed, jj + 1));

    let value = SCALE * (corner(g0, x0, y0) + corner(g1, x1, y1) + corner(g2, x2, y2));
    if value.is_finite() { value } else { 0.0 }
}

/// Contribution of one corner with gradient hash `hash` at offset `(x, y)`.
fn corner(hash: u128, x: f64, y: f64) -> f64 {
    let t = RADIUS_SQ - x * x - y * y;
    if t < 0.0 {
        return 0.0;
    }
    let (gx, gy) = GRADIENTS[(hash % GRADIENTS.len() as u128) as usize];
    t.powi(4) * gx.mul_add(x, gy * y)
}

/// Integer hash of `x` into `0..=255`.
fn perm(seed: u128, x: u128) -> u128 {
    let x = ((x / HASH_FOLD) ^ x) * HASH_MULTIPLIER;
    let x = ((x / HASH_FOLD) ^ x) * (HASH_MULTIPLIER + seed);
    ((x / HASH_FOLD) ^ x) & 0xff
}
