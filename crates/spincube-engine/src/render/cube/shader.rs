//! WGSL compile + link.
//!
//! Each stage is parsed and validated with naga on the CPU, so every shader
//! problem surfaces as a [`StartupError`] with the compiler's own diagnostic
//! before any GPU object exists. Linking checks what a GL program link would:
//! stage interfaces line up and resource declarations agree.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use naga::{AddressSpace, Binding, Handle, Module, Scalar, Type, TypeInner};

use crate::error::StartupError;

use super::mesh::Vertex;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn to_naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }

    fn visibility(self) -> wgpu::ShaderStages {
        match self {
            ShaderStage::Vertex => wgpu::ShaderStages::VERTEX,
            ShaderStage::Fragment => wgpu::ShaderStages::FRAGMENT,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// A parsed and validated single-stage module.
#[derive(Debug, Clone)]
pub struct CompiledStage {
    stage: ShaderStage,
    module: Module,
    entry_point: String,
}

impl CompiledStage {
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    fn entry(&self) -> Option<&naga::EntryPoint> {
        self.module
            .entry_points
            .iter()
            .find(|ep| ep.name == self.entry_point)
    }
}

/// Parses and validates `source` as a `stage` shader.
///
/// The module must declare at least one entry point of the requested stage; the
/// first one is used.
pub fn compile_stage(stage: ShaderStage, source: &str) -> Result<CompiledStage, StartupError> {
    let fail = |log: String| StartupError::ShaderCompile { stage, log };

    let module = naga::front::wgsl::parse_str(source).map_err(|e| fail(e.emit_to_string(source)))?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::default(),
    )
    .validate(&module)
    .map_err(|e| fail(e.emit_to_string(source)))?;

    let entry_point = module
        .entry_points
        .iter()
        .find(|ep| ep.stage == stage.to_naga())
        .map(|ep| ep.name.clone())
        .ok_or_else(|| fail(format!("no @{stage} entry point")))?;

    log::debug!("compiled {stage} stage (entry `{entry_point}`)");

    Ok(CompiledStage {
        stage,
        module,
        entry_point,
    })
}

// ── binding table ─────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BindingKind {
    Uniform,
    Texture,
    Sampler,
    Other,
}

/// Where a named shader resource lives and which stages read it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BindingSlot {
    pub group: u32,
    pub binding: u32,
    pub kind: BindingKind,
    pub visibility: wgpu::ShaderStages,
    /// Byte size of the declared type; 0 for textures and samplers.
    pub size: u32,
}

/// Resource name → slot, built once when the program is linked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingTable {
    slots: BTreeMap<String, BindingSlot>,
}

impl BindingTable {
    pub fn get(&self, name: &str) -> Option<BindingSlot> {
        self.slots.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Looks up `name` and checks that it is a `kind` resource.
    pub fn resolve(&self, name: &str, kind: BindingKind) -> Result<BindingSlot, StartupError> {
        let slot = self.get(name).ok_or_else(|| StartupError::ProgramLink {
            log: format!("program does not declare `{name}`"),
        })?;

        if slot.kind != kind {
            return Err(StartupError::ProgramLink {
                log: format!("`{name}` is a {:?} binding, expected {kind:?}", slot.kind),
            });
        }

        Ok(slot)
    }

    fn insert(&mut self, name: String, slot: BindingSlot) -> Result<(), String> {
        if let Some((other, _)) = self
            .slots
            .iter()
            .find(|(n, s)| **n != name && s.group == slot.group && s.binding == slot.binding)
        {
            return Err(format!(
                "@group({}) @binding({}) is declared as both `{other}` and `{name}`",
                slot.group, slot.binding
            ));
        }

        match self.slots.get_mut(&name) {
            Some(existing) => {
                if (existing.group, existing.binding, existing.kind)
                    != (slot.group, slot.binding, slot.kind)
                {
                    return Err(format!("`{name}` is declared differently by the two stages"));
                }
                existing.visibility |= slot.visibility;
            }
            None => {
                self.slots.insert(name, slot);
            }
        }

        Ok(())
    }

    fn collect(&mut self, stage: &CompiledStage) -> Result<(), String> {
        let module = &stage.module;
        for (_, var) in module.global_variables.iter() {
            let (Some(name), Some(rb)) = (&var.name, &var.binding) else { continue };

            let ty = &module.types[var.ty].inner;
            let kind = match var.space {
                AddressSpace::Uniform => BindingKind::Uniform,
                AddressSpace::Handle => match ty {
                    TypeInner::Image { .. } => BindingKind::Texture,
                    TypeInner::Sampler { .. } => BindingKind::Sampler,
                    _ => BindingKind::Other,
                },
                _ => BindingKind::Other,
            };

            self.insert(
                name.clone(),
                BindingSlot {
                    group: rb.group,
                    binding: rb.binding,
                    kind,
                    visibility: stage.stage.visibility(),
                    size: match kind {
                        BindingKind::Texture | BindingKind::Sampler => 0,
                        _ => ty.size(module.to_ctx()),
                    },
                },
            )?;
        }
        Ok(())
    }
}

// ── link ──────────────────────────────────────────────────────────────────

/// A vertex + fragment pair whose interfaces agree.
#[derive(Debug, Clone)]
pub struct LinkedProgram {
    vertex: CompiledStage,
    fragment: CompiledStage,
    bindings: BindingTable,
}

impl LinkedProgram {
    pub fn vertex(&self) -> &CompiledStage {
        &self.vertex
    }

    pub fn fragment(&self) -> &CompiledStage {
        &self.fragment
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    /// Hands a validated stage to wgpu without re-parsing WGSL.
    pub(crate) fn create_module(
        &self,
        device: &wgpu::Device,
        stage: ShaderStage,
    ) -> wgpu::ShaderModule {
        let (compiled, label) = match stage {
            ShaderStage::Vertex => (&self.vertex, "spincube vertex shader"),
            ShaderStage::Fragment => (&self.fragment, "spincube fragment shader"),
        };
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(compiled.module.clone())),
        })
    }
}

/// A `@location` value crossing a stage boundary.
#[derive(Debug, Clone, PartialEq)]
struct Varying {
    location: u32,
    ty: TypeInner,
}

fn collect_varyings(
    module: &Module,
    ty: Handle<Type>,
    binding: Option<&Binding>,
    out: &mut Vec<Varying>,
) {
    match binding {
        Some(Binding::Location { location, .. }) => out.push(Varying {
            location: *location,
            ty: module.types[ty].inner.clone(),
        }),
        None => {
            if let TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for m in members {
                    collect_varyings(module, m.ty, m.binding.as_ref(), out);
                }
            }
        }
        Some(_) => {}
    }
}

fn entry_inputs(stage: &CompiledStage) -> Vec<Varying> {
    let mut out = Vec::new();
    if let Some(ep) = stage.entry() {
        for arg in &ep.function.arguments {
            collect_varyings(&stage.module, arg.ty, arg.binding.as_ref(), &mut out);
        }
    }
    out
}

fn entry_outputs(stage: &CompiledStage) -> Vec<Varying> {
    let mut out = Vec::new();
    if let Some(result) = stage.entry().and_then(|ep| ep.function.result.as_ref()) {
        collect_varyings(&stage.module, result.ty, result.binding.as_ref(), &mut out);
    }
    out
}

fn describe(ty: &TypeInner) -> String {
    match ty {
        TypeInner::Scalar(s) => scalar_name(*s),
        TypeInner::Vector { size, scalar } => format!("vec{}<{}>", *size as u8, scalar_name(*scalar)),
        other => format!("{other:?}"),
    }
}

fn scalar_name(s: Scalar) -> String {
    match s {
        Scalar::F32 => "f32".into(),
        Scalar::I32 => "i32".into(),
        Scalar::U32 => "u32".into(),
        Scalar::BOOL => "bool".into(),
        other => format!("{:?}{}", other.kind, other.width as u32 * 8),
    }
}

fn f32_components(ty: &TypeInner) -> Option<u32> {
    match ty {
        TypeInner::Scalar(Scalar::F32) => Some(1),
        TypeInner::Vector { size, scalar: Scalar::F32 } => Some(*size as u32),
        _ => None,
    }
}

fn check_vertex_inputs(vertex: &CompiledStage) -> Vec<String> {
    let mut errors = Vec::new();
    for input in entry_inputs(vertex) {
        match Vertex::components_at(input.location) {
            None => errors.push(format!(
                "vertex input @location({}) is not provided by the vertex layout",
                input.location
            )),
            Some(n) if f32_components(&input.ty) != Some(n) => errors.push(format!(
                "vertex input @location({}) is {}, layout provides {n} x f32",
                input.location,
                describe(&input.ty)
            )),
            Some(_) => {}
        }
    }
    errors
}

fn check_stage_interface(vertex: &CompiledStage, fragment: &CompiledStage) -> Vec<String> {
    let outputs = entry_outputs(vertex);
    let mut errors = Vec::new();

    for input in entry_inputs(fragment) {
        match outputs.iter().find(|o| o.location == input.location) {
            None => errors.push(format!(
                "fragment input @location({}) is not written by the vertex stage",
                input.location
            )),
            Some(out) if out.ty != input.ty => errors.push(format!(
                "@location({}) type mismatch: vertex writes {}, fragment reads {}",
                input.location,
                describe(&out.ty),
                describe(&input.ty)
            )),
            Some(_) => {}
        }
    }
    errors
}

/// Links two compiled stages.
///
/// All problems are gathered into one log, one per line, like a driver's link log.
pub fn link(vertex: CompiledStage, fragment: CompiledStage) -> Result<LinkedProgram, StartupError> {
    let mut errors = Vec::new();

    if vertex.stage != ShaderStage::Vertex {
        errors.push(format!("expected a vertex stage, got {}", vertex.stage));
    }
    if fragment.stage != ShaderStage::Fragment {
        errors.push(format!("expected a fragment stage, got {}", fragment.stage));
    }

    if errors.is_empty() {
        errors.extend(check_vertex_inputs(&vertex));
        errors.extend(check_stage_interface(&vertex, &fragment));
    }

    let mut bindings = BindingTable::default();
    for stage in [&vertex, &fragment] {
        if let Err(e) = bindings.collect(stage) {
            errors.push(e);
        }
    }

    if !errors.is_empty() {
        return Err(StartupError::ProgramLink {
            log: errors.join("\n"),
        });
    }

    log::debug!("linked program with {} resource bindings", bindings.len());

    Ok(LinkedProgram {
        vertex,
        fragment,
        bindings,
    })
}
