//! Interleaved mesh data: position (3), texture coordinates (2), normal (3).

/// Unit cube centered on the origin, 36 vertices.
#[rustfmt::skip]
pub const CUBE: [f32; 36 * 8] = [
    -0.5, -0.5, -0.5,   0.0,  0.0,   0.0,  0.0, -1.0,
     0.5, -0.5, -0.5,   1.0,  0.0,   0.0,  0.0, -1.0,
     0.5,  0.5, -0.5,   1.0,  1.0,   0.0,  0.0, -1.0,
     0.5,  0.5, -0.5,   1.0,  1.0,   0.0,  0.0, -1.0,
    -0.5,  0.5, -0.5,   0.0,  1.0,   0.0,  0.0, -1.0,
    -0.5, -0.5, -0.5,   0.0,  0.0,   0.0,  0.0, -1.0,

    -0.5, -0.5,  0.5,   0.0,  0.0,   0.0,  0.0,  1.0,
     0.5, -0.5,  0.5,   1.0,  0.0,   0.0,  0.0,  1.0,
     0.5,  0.5,  0.5,   1.0,  1.0,   0.0,  0.0,  1.0,
     0.5,  0.5,  0.5,   1.0,  1.0,   0.0,  0.0,  1.0,
    -0.5,  0.5,  0.5,   0.0,  1.0,   0.0,  0.0,  1.0,
    -0.5, -0.5,  0.5,   0.0,  0.0,   0.0,  0.0,  1.0,

    -0.5,  0.5,  0.5,   1.0,  0.0,  -1.0,  0.0,  0.0,
    -0.5,  0.5, -0.5,   1.0,  1.0,  -1.0,  0.0,  0.0,
    -0.5, -0.5, -0.5,   0.0,  1.0,  -1.0,  0.0,  0.0,
    -0.5, -0.5, -0.5,   0.0,  1.0,  -1.0,  0.0,  0.0,
    -0.5, -0.5,  0.5,   0.0,  0.0,  -1.0,  0.0,  0.0,
    -0.5,  0.5,  0.5,   1.0,  0.0,  -1.0,  0.0,  0.0,

     0.5,  0.5,  0.5,   1.0,  0.0,   1.0,  0.0,  0.0,
     0.5,  0.5, -0.5,   1.0,  1.0,   1.0,  0.0,  0.0,
     0.5, -0.5, -0.5,   0.0,  1.0,   1.0,  0.0,  0.0,
     0.5, -0.5, -0.5,   0.0,  1.0,   1.0,  0.0,  0.0,
     0.5, -0.5,  0.5,   0.0,  0.0,   1.0,  0.0,  0.0,
     0.5,  0.5,  0.5,   1.0,  0.0,   1.0,  0.0,  0.0,

    -0.5, -0.5, -0.5,   0.0,  0.0,   0.0, -1.0,  0.0,
     0.5, -0.5, -0.5,   1.0,  0.0,   0.0, -1.0,  0.0,
     0.5, -0.5,  0.5,   1.0,  1.0,   0.0, -1.0,  0.0,
     0.5, -0.5,  0.5,   1.0,  1.0,   0.0, -1.0,  0.0,
    -0.5, -0.5,  0.5,   0.0,  1.0,   0.0, -1.0,  0.0,
    -0.5, -0.5, -0.5,   0.0,  0.0,   0.0, -1.0,  0.0,

    -0.5,  0.5, -0.5,   0.0,  0.0,   0.0,  1.0,  0.0,
     0.5,  0.5, -0.5,   1.0,  0.0,   0.0,  1.0,  0.0,
     0.5,  0.5,  0.5,   1.0,  1.0,   0.0,  1.0,  0.0,
     0.5,  0.5,  0.5,   1.0,  1.0,   0.0,  1.0,  0.0,
    -0.5,  0.5,  0.5,   0.0,  1.0,   0.0,  1.0,  0.0,
    -0.5,  0.5, -0.5,   0.0,  0.0,   0.0,  1.0,  0.0,
];

/// 10x10 floor at y = -0.5 with the texture repeated twice per axis.
#[rustfmt::skip]
pub const PLANE: [f32; 6 * 8] = [
     5.0, -0.5,  5.0,   2.0,  0.0,   0.0,  1.0,  0.0,
    -5.0, -0.5,  5.0,   0.0,  0.0,   0.0,  1.0,  0.0,
    -5.0, -0.5, -5.0,   0.0,  2.0,   0.0,  1.0,  0.0,
     5.0, -0.5,  5.0,   2.0,  0.0,   0.0,  1.0,  0.0,
    -5.0, -0.5, -5.0,   0.0,  2.0,   0.0,  1.0,  0.0,
     5.0, -0.5, -5.0,   2.0,  2.0,   0.0,  1.0,  0.0,
];
