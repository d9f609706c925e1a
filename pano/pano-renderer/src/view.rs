//! View synthesis: yaw/pitch + viewport aspect -> combined view-projection.
//! All matrices are column-major `[f32; 16]`, WebGPU NDC z in [0, 1], the
//! same convention the sphere pass uniform expects. Mixing conventions would
//! silently mirror or clip the image.

/// Build perspective projection matrix (column-major, WebGPU NDC z in [0,1]).
/// View space: -Z forward, maps -near -> NDC 0, -far -> NDC 1.
pub fn perspective_projection(fov_y_rad: f32, aspect: f32, near: f32, far: f32) -> [f32; 16] {
    let t = (fov_y_rad / 2.0).tan();
    let sy = 1.0 / t;
    let sx = sy / aspect;
    let a = far / (near - far);
    let b = (near * far) / (near - far);
    [
        sx, 0.0, 0.0, 0.0,
        0.0, sy, 0.0, 0.0,
        0.0, 0.0, a, -1.0,
        0.0, 0.0, b, 0.0,
    ]
}

/// Build look-at view matrix (column-major). Camera at eye looking at center.
pub fn look_at(eye: [f32; 3], center: [f32; 3], up: [f32; 3]) -> [f32; 16] {
    let f = [
        center[0] - eye[0],
        center[1] - eye[1],
        center[2] - eye[2],
    ];
    let len_f = (f[0] * f[0] + f[1] * f[1] + f[2] * f[2]).sqrt();
    let f = [f[0] / len_f, f[1] / len_f, f[2] / len_f];
    let s = [
        f[1] * up[2] - f[2] * up[1],
        f[2] * up[0] - f[0] * up[2],
        f[0] * up[1] - f[1] * up[0],
    ];
    let len_s = (s[0] * s[0] + s[1] * s[1] + s[2] * s[2]).sqrt();
    let s = [s[0] / len_s, s[1] / len_s, s[2] / len_s];
    let u = [
        s[1] * f[2] - s[2] * f[1],
        s[2] * f[0] - s[0] * f[2],
        s[0] * f[1] - s[1] * f[0],
    ];
    // View matrix (column-major): right, up, -forward, translation
    [
        s[0], u[0], -f[0], 0.0,
        s[1], u[1], -f[1], 0.0,
        s[2], u[2], -f[2], 0.0,
        -(s[0] * eye[0] + s[1] * eye[1] + s[2] * eye[2]),
        -(u[0] * eye[0] + u[1] * eye[1] + u[2] * eye[2]),
        f[0] * eye[0] + f[1] * eye[1] + f[2] * eye[2],
        1.0,
    ]
}

/// Multiply two 4x4 column-major matrices: C = A * B.
pub fn mat4_mul(a: &[f32; 16], b: &[f32; 16]) -> [f32; 16] {
    let mut c = [0.0f32; 16];
    for col in 0..4 {
        for row in 0..4 {
            c[col * 4 + row] = a[row] * b[col * 4]
                + a[4 + row] * b[col * 4 + 1]
                + a[8 + row] * b[col * 4 + 2]
                + a[12 + row] * b[col * 4 + 3];
        }
    }
    c
}

/// Unit eye direction for a yaw/pitch heading (degrees). Yaw 0 / pitch 0
/// looks along +Z.
pub fn eye_direction(yaw_deg: f32, pitch_deg: f32) -> [f32; 3] {
    let yaw = yaw_deg.to_radians();
    let pitch = pitch_deg.to_radians();
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    let (sin_pitch, cos_pitch) = pitch.sin_cos();
    [cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw]
}

/// Combined view-projection for one frame. The eye sits on the unit sphere
/// looking at the origin; since the viewer is conceptually at the sphere's
/// center looking outward, the effect is a pure rotation.
pub fn view_projection(
    yaw_deg: f32,
    pitch_deg: f32,
    aspect: f32,
    fov_y_deg: f32,
    near: f32,
    far: f32,
) -> [f32; 16] {
    let proj = perspective_projection(fov_y_deg.to_radians(), aspect, near, far);
    let view = look_at(eye_direction(yaw_deg, pitch_deg), [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
    mat4_mul(&proj, &view)
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDENTITY: [f32; 16] = [
        1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
    ];

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn level_heading_looks_along_positive_z() {
        let dir = eye_direction(0.0, 0.0);
        assert!(approx(dir[0], 0.0) && approx(dir[1], 0.0) && approx(dir[2], 1.0));
    }

    #[test]
    fn quarter_turn_looks_along_positive_x() {
        let dir = eye_direction(90.0, 0.0);
        assert!(approx(dir[0], 1.0) && approx(dir[1], 0.0) && approx(dir[2], 0.0));
    }

    #[test]
    fn projection_encodes_aspect() {
        let aspect = 1920.0 / 1080.0;
        let proj = perspective_projection(40f32.to_radians(), aspect, 0.1, 100.0);
        // Column-major: [0] is x scale = y scale / aspect.
        assert!(approx(proj[5] / proj[0], aspect));
    }

    #[test]
    fn mat4_mul_identity() {
        let m = perspective_projection(1.0, 1.5, 0.1, 100.0);
        assert_eq!(mat4_mul(&m, &IDENTITY), m);
        assert_eq!(mat4_mul(&IDENTITY, &m), m);
    }

    #[test]
    fn look_at_moves_eye_to_origin() {
        // A point at the eye position must land at the view-space origin.
        let eye = eye_direction(30.0, -20.0);
        let view = look_at(eye, [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let p = [
            view[0] * eye[0] + view[4] * eye[1] + view[8] * eye[2] + view[12],
            view[1] * eye[0] + view[5] * eye[1] + view[9] * eye[2] + view[13],
            view[2] * eye[0] + view[6] * eye[1] + view[10] * eye[2] + view[14],
        ];
        assert!(approx(p[0], 0.0) && approx(p[1], 0.0) && approx(p[2], 0.0));
    }

    #[test]
    fn view_projection_is_finite() {
        let vp = view_projection(123.0, -40.0, 1.78, 40.0, 0.1, 100.0);
        assert!(vp.iter().all(|x| x.is_finite()));
    }
}
