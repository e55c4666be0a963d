/// WGSL shader for every mesh: full world/view/projection transform and a
/// per-object tint multiplied into the vertex color.
pub const OBJECT_SHADER: &str = r#"
struct ObjectConstants {
    world: mat4x4<f32>,
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    tint: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> object: ObjectConstants;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let world_pos = object.world * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = object.projection * object.view * world_pos;
    out.color = saturate(vertex.color * object.tint);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;
