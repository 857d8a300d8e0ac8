//! Normative shader sources for the volume ray-caster.
//!
//! Both strings are WGSL. Implementations on other graphics APIs must reproduce identical
//! output — regenerate from an equivalent compute kernel rather than drift from this one.

/// Emits a full-screen triangle-strip quad from `gl_VertexID`-equivalent `vertex_index` 0..6,
/// with no vertex buffer bound.
pub const VERTEX_SHADER_SRC: &str = r#"
struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> VertexOutput {
    var positions = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );

    var out: VertexOutput;
    let p = positions[vertex_index];
    out.clip_position = vec4<f32>(p, 0.0, 1.0);
    out.uv = p * 0.5 + vec2<f32>(0.5, 0.5);
    return out;
}
"#;

/// Ray-casts `uVolume` from the camera through the unit cube `[0,1]^3` scaled by
/// `dims * spacing`, accumulating front-to-back alpha via `uTransferFunction`.
pub const FRAGMENT_SHADER_SRC: &str = r#"
struct VolumeInfo {
    inverse_view_proj: mat4x4<f32>,
    camera_world_pos: vec4<f32>,
    volume_size_mm: vec4<f32>,
    volume_dims: vec4<u32>,
    step_size_mm: f32,
    opacity_scale: f32,
    hu_min: f32,
    hu_max: f32,
};

@group(0) @binding(0)
var<uniform> info: VolumeInfo;

@group(0) @binding(1)
var uVolume: texture_3d<i32>;

@group(0) @binding(2)
var uTransferFunction: texture_2d<f32>;

@group(0) @binding(3)
var uTransferFunctionSampler: sampler;

fn hu_at(coord: vec3<i32>) -> f32 {
    let dims = vec3<i32>(info.volume_dims.xyz);
    let clamped = clamp(coord, vec3<i32>(0, 0, 0), dims - vec3<i32>(1, 1, 1));
    return f32(textureLoad(uVolume, clamped, 0).r);
}

// Manual trilinear interpolation: integer textures cannot be hardware-filtered.
fn sample_volume_trilinear(pos_voxel: vec3<f32>) -> f32 {
    let base = floor(pos_voxel);
    let frac = pos_voxel - base;
    let b = vec3<i32>(base);

    let c000 = hu_at(b + vec3<i32>(0, 0, 0));
    let c100 = hu_at(b + vec3<i32>(1, 0, 0));
    let c010 = hu_at(b + vec3<i32>(0, 1, 0));
    let c110 = hu_at(b + vec3<i32>(1, 1, 0));
    let c001 = hu_at(b + vec3<i32>(0, 0, 1));
    let c101 = hu_at(b + vec3<i32>(1, 0, 1));
    let c011 = hu_at(b + vec3<i32>(0, 1, 1));
    let c111 = hu_at(b + vec3<i32>(1, 1, 1));

    let c00 = mix(c000, c100, frac.x);
    let c10 = mix(c010, c110, frac.x);
    let c01 = mix(c001, c101, frac.x);
    let c11 = mix(c011, c111, frac.x);

    let c0 = mix(c00, c10, frac.y);
    let c1 = mix(c01, c11, frac.y);

    return mix(c0, c1, frac.z);
}

// Ray-AABB slab intersection against [0, volume_size_mm].
fn intersect_aabb(ray_origin: vec3<f32>, ray_dir: vec3<f32>, box_max: vec3<f32>) -> vec2<f32> {
    let inv_dir = 1.0 / ray_dir;
    let t0 = (vec3<f32>(0.0, 0.0, 0.0) - ray_origin) * inv_dir;
    let t1 = (box_max - ray_origin) * inv_dir;
    let tmin = min(t0, t1);
    let tmax = max(t0, t1);
    let t_near = max(max(tmin.x, tmin.y), tmin.z);
    let t_far = min(min(tmax.x, tmax.y), tmax.z);
    return vec2<f32>(t_near, t_far);
}

@fragment
fn fs_main(@builtin(position) frag_coord: vec4<f32>, @location(0) uv: vec2<f32>) -> @location(0) vec4<f32> {
    let ndc = vec4<f32>(uv.x * 2.0 - 1.0, 1.0 - uv.y * 2.0, 1.0, 1.0);
    let world = info.inverse_view_proj * ndc;
    let far_point = world.xyz / world.w;

    let ray_origin_mm = info.camera_world_pos.xyz;
    let ray_dir = normalize(far_point - ray_origin_mm);

    let hit = intersect_aabb(ray_origin_mm, ray_dir, info.volume_size_mm.xyz);
    var t_near = max(hit.x, 0.0);
    let t_far = hit.y;

    if (t_near >= t_far) {
        discard;
    }

    var accumulated = vec4<f32>(0.0, 0.0, 0.0, 0.0);
    let voxels_per_mm = vec3<f32>(info.volume_dims.xyz) / info.volume_size_mm.xyz;
    let step = info.step_size_mm;

    var t = t_near;
    loop {
        if (t >= t_far || accumulated.a > 0.99) {
            break;
        }

        let pos_mm = ray_origin_mm + ray_dir * t;
        let pos_voxel = pos_mm * voxels_per_mm;
        let hu = sample_volume_trilinear(pos_voxel);

        let normalized = clamp((hu + 1024.0) / 4095.0, 0.0, 1.0);
        let tf_sample = textureSampleLevel(uTransferFunction, uTransferFunctionSampler, vec2<f32>(normalized, 0.5), 0.0);

        // Opacity correction for variable step length.
        let alpha = 1.0 - pow(max(1.0 - tf_sample.a * info.opacity_scale, 0.0), step * 500.0);
        let one_minus_a = 1.0 - accumulated.a;
        accumulated = vec4<f32>(
            accumulated.rgb + one_minus_a * alpha * tf_sample.rgb,
            accumulated.a + one_minus_a * alpha,
        );

        t = t + step;
    }

    return accumulated;
}
"#;
