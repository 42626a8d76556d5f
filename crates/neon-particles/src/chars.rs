//! Glyphs used to draw particles.

/// Ambient dust, from smallest to largest apparent size.
pub const DUST_CHARS: &[char] = &['·', '•', '✦'];

/// Burst and trail sparks, indexed by rotation quadrant.
pub const SPARK_CHARS: &[char] = &['+', '×', '✕', '✱'];

/// Orbs, far and near.
pub const ORB_CHARS: &[char] = &['○', '●'];

/// Orb glow ring.
pub const HALO_CHAR: char = '░';
