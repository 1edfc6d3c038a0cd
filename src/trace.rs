use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use derive_where::derive_where;
use rustc_hash::FxHashMap;
pub use vcd::{IdCode, TimescaleUnit, Value as TraceValue};
use vcd::{VarType, Writer as VcdWriter};

use crate::{
    bcd::Bcd,
    display::DisplayMask,
    seven_seg::Segments,
    stopwatch::StopwatchOutput,
};

pub trait Traceable {
    fn add_vars(vars: &mut TraceVars);

    fn trace(&self, id: &mut IdCode, tracer: &mut Tracer) -> io::Result<()>;
}

impl<'a, T: Traceable> Traceable for &'a T {
    #[inline]
    fn add_vars(vars: &mut TraceVars) {
        T::add_vars(vars);
    }

    #[inline]
    fn trace(&self, id: &mut IdCode, tracer: &mut Tracer) -> io::Result<()> {
        (*self).trace(id, tracer)
    }
}

pub(crate) fn bool_to_vcd(b: bool) -> TraceValue {
    if b {
        TraceValue::V1
    } else {
        TraceValue::V0
    }
}

/// Bits of `value`, most significant first.
pub(crate) fn bits_to_vcd(value: u64, width: u32) -> impl Iterator<Item = TraceValue> {
    (0..width).rev().map(move |idx| bool_to_vcd((value >> idx) & 1 == 1))
}

/// Width of a traced leaf: a single wire or a bus of `n` bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceTy {
    Wire,
    Bus(u32),
}

impl TraceTy {
    fn vcd_var(self) -> (VarType, u32) {
        match self {
            Self::Wire => (VarType::Wire, 1),
            Self::Bus(width) => (VarType::Integer, width),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Decl {
    Scope(&'static str),
    Leaf(TraceTy),
    End,
}

/// Declarations of the traced variables. Nested fields are flattened into
/// leaves named `var$field$subfield`.
#[derive(Debug, Default)]
pub struct TraceVars {
    decls: Vec<Decl>,
}

impl TraceVars {
    pub fn add_var<T: Traceable>(mut self, sym: &'static str, _var: &T) -> Self {
        self.add_field::<T>(sym);
        self
    }

    /// Adds a nested field `sym` of type `T`.
    pub fn add_field<T: Traceable>(&mut self, sym: &'static str) {
        self.decls.push(Decl::Scope(sym));
        T::add_vars(self);
        self.decls.push(Decl::End);
    }

    #[inline]
    pub fn add_ty(&mut self, ty: TraceTy) {
        self.decls.push(Decl::Leaf(ty));
    }
}

/// Time unit of the VCD timestamps, one picosecond by default.
#[derive(Debug, Clone, Copy)]
pub struct Timescale(pub u32, pub TimescaleUnit);

impl Default for Timescale {
    fn default() -> Self {
        Self(1, TimescaleUnit::PS)
    }
}

/// Writes traced values into a VCD file. A variable is addressed by the id of
/// its first leaf; its remaining leaves follow with consecutive ids.
#[derive_where(Debug)]
pub struct Tracer {
    vars: FxHashMap<&'static str, IdCode>,
    mod_name: &'static str,
    timescale: Timescale,
    #[derive_where(skip)]
    vcd: VcdWriter<Box<dyn Write>>,
}

impl Tracer {
    pub fn open_vcd<P: AsRef<Path>>(
        path: P,
        vars: TraceVars,
        mod_name: &'static str,
        timescale: Option<Timescale>,
    ) -> io::Result<Self> {
        let file = BufWriter::new(File::create(path)?);
        Self::new(Box::new(file), vars, mod_name, timescale)
    }

    pub fn new(
        writer: Box<dyn Write>,
        vars: TraceVars,
        mod_name: &'static str,
        timescale: Option<Timescale>,
    ) -> io::Result<Self> {
        let timescale = timescale.unwrap_or_default();
        let mut vcd = VcdWriter::new(writer);
        vcd.timescale(timescale.0, timescale.1)?;
        vcd.add_module(mod_name)?;

        let mut ids = FxHashMap::default();
        let mut path: Vec<&'static str> = Vec::with_capacity(4);
        let mut first_leaf = None;
        for decl in vars.decls {
            match decl {
                Decl::Scope(sym) => path.push(sym),
                Decl::Leaf(ty) => {
                    let (var_ty, width) = ty.vcd_var();
                    let id = vcd.add_var(var_ty, width, &path.join("$"), None)?;
                    first_leaf.get_or_insert(id);
                }
                Decl::End => {
                    let sym = path.pop();
                    if path.is_empty() {
                        if let (Some(sym), Some(id)) = (sym, first_leaf.take()) {
                            ids.insert(sym, id);
                        }
                    }
                }
            }
        }
        vcd.upscope()?;
        vcd.enddefinitions()?;

        Ok(Self {
            vars: ids,
            mod_name,
            timescale,
            vcd,
        })
    }

    #[inline]
    pub fn mod_name(&self) -> &'static str {
        self.mod_name
    }

    #[inline]
    pub fn timescale(&self) -> Timescale {
        self.timescale
    }

    pub fn dump_time(&mut self, time: u64) -> io::Result<()> {
        self.vcd.timestamp(time)
    }

    /// Ignores variables that were not declared in `TraceVars`.
    pub fn trace<T: Traceable>(&mut self, sym: &'static str, value: &T) -> io::Result<()> {
        match self.vars.get(sym).copied() {
            Some(mut id) => value.trace(&mut id, self),
            None => Ok(()),
        }
    }

    pub fn change_wire(&mut self, id: &mut IdCode, value: TraceValue) -> io::Result<()> {
        self.vcd.change_scalar(*id, value)?;
        *id = id.next();

        Ok(())
    }

    pub fn change_bus(
        &mut self,
        id: &mut IdCode,
        values: impl IntoIterator<Item = TraceValue>,
    ) -> io::Result<()> {
        self.vcd.change_vector(*id, values)?;
        *id = id.next();

        Ok(())
    }

    #[inline]
    pub fn flush(&mut self) -> io::Result<()> {
        self.vcd.flush()
    }
}

impl Traceable for bool {
    fn add_vars(vars: &mut TraceVars) {
        vars.add_ty(TraceTy::Wire);
    }

    fn trace(&self, id: &mut IdCode, tracer: &mut Tracer) -> io::Result<()> {
        tracer.change_wire(id, bool_to_vcd(*self))
    }
}

macro_rules! impl_traceable_bus {
    ($( $ty:ty => $width:literal ),+) => {
        $(
            impl Traceable for $ty {
                fn add_vars(vars: &mut TraceVars) {
                    vars.add_ty(TraceTy::Bus($width));
                }

                fn trace(&self, id: &mut IdCode, tracer: &mut Tracer) -> io::Result<()> {
                    tracer.change_bus(id, bits_to_vcd(*self as u64, $width))
                }
            }
        )+
    };
}

impl_traceable_bus!(u8 => 8, u16 => 16, u32 => 32);

impl Traceable for Bcd {
    fn add_vars(vars: &mut TraceVars) {
        vars.add_ty(TraceTy::Bus(32));
    }

    fn trace(&self, id: &mut IdCode, tracer: &mut Tracer) -> io::Result<()> {
        self.packed().trace(id, tracer)
    }
}

impl Traceable for Segments {
    fn add_vars(vars: &mut TraceVars) {
        vars.add_ty(TraceTy::Bus(8));
    }

    fn trace(&self, id: &mut IdCode, tracer: &mut Tracer) -> io::Result<()> {
        self.bits().trace(id, tracer)
    }
}

impl Traceable for DisplayMask {
    fn add_vars(vars: &mut TraceVars) {
        vars.add_field::<u8>("digits");
        vars.add_field::<u8>("points");
    }

    fn trace(&self, id: &mut IdCode, tracer: &mut Tracer) -> io::Result<()> {
        self.digits.trace(id, tracer)?;
        self.points.trace(id, tracer)
    }
}

impl Traceable for StopwatchOutput {
    fn add_vars(vars: &mut TraceVars) {
        vars.add_field::<Bcd>("digits");
        vars.add_field::<DisplayMask>("mask");
        vars.add_field::<bool>("running");
    }

    fn trace(&self, id: &mut IdCode, tracer: &mut Tracer) -> io::Result<()> {
        self.digits.trace(id, tracer)?;
        self.mask.trace(id, tracer)?;
        self.running.trace(id, tracer)
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use super::*;

    #[test]
    fn bits_msb_first() {
        use TraceValue::{V0, V1};

        assert_eq!(bits_to_vcd(0b1011, 4).collect::<Vec<_>>(), [V1, V0, V1, V1]);
        assert_eq!(bits_to_vcd(1, 3).collect::<Vec<_>>(), [V0, V0, V1]);
    }

    #[test]
    fn writes_vcd() {
        let path = env::temp_dir().join(format!("stopwatch-trace-{}.vcd", process::id()));
        let out = StopwatchOutput::default();
        let vars = TraceVars::default()
            .add_var("clk", &false)
            .add_var("out", &out);

        let mut tracer = Tracer::open_vcd(&path, vars, "top", None).unwrap();
        for (time, clk) in [(0, true), (5, false)] {
            tracer.dump_time(time).unwrap();
            tracer.trace("clk", &clk).unwrap();
            tracer.trace("out", &out).unwrap();
            tracer.trace("unknown", &clk).unwrap();
        }
        tracer.flush().unwrap();
        assert_eq!(tracer.mod_name(), "top");
        drop(tracer);

        let vcd = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert!(vcd.contains("$timescale"));
        assert!(vcd.contains("module top"));
        for name in ["clk", "out$digits", "out$mask$digits", "out$mask$points", "out$running"] {
            assert!(vcd.contains(name), "missing {name} in {vcd}");
        }
        assert!(vcd.contains("#0"));
        assert!(vcd.contains("#5"));
        assert!(vcd.contains("$enddefinitions"));
    }
}
