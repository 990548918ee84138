//! Parameter definitions: declared kind, default, bounds, options and
//! dependencies for every key the solver understands.
//!
//! The schema is a read-only lookup table. The writer consults it to omit
//! defaults; validation consults it for bounds and option checks.

use indexmap::IndexMap;

use crate::error::ParamError;
use crate::value::{ParamMap, Value};

/// Declared kind of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Scalar integer.
    Int,
    /// Scalar float.
    Float,
    /// `true` / `false`.
    Bool,
    /// Free-form string.
    String,
    /// One of a fixed set of strings.
    Enum,
    /// Three integers, one per spatial axis.
    IntVec3,
    /// Three floats, one per spatial axis.
    FloatVec3,
    /// Space-separated list of strings.
    StringList,
}

/// Definition of a single solver parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDefinition {
    key: String,
    label: String,
    description: String,
    group: String,
    kind: ParamKind,
    default: Option<Value>,
    required: bool,
    min_value: Option<f64>,
    max_value: Option<f64>,
    enum_options: Option<Vec<String>>,
    depends_on: Option<(String, Value)>,
    units: Option<String>,
}

impl ParameterDefinition {
    /// Create a definition with no default, bounds, options or dependency.
    pub fn new(key: impl Into<String>, group: impl Into<String>, kind: ParamKind) -> Self {
        let key = key.into();
        Self {
            label: key.clone(),
            key,
            description: String::new(),
            group: group.into(),
            kind,
            default: None,
            required: false,
            min_value: None,
            max_value: None,
            enum_options: None,
            depends_on: None,
            units: None,
        }
    }

    /// Set the human-readable label and description.
    pub fn with_label(mut self, label: impl Into<String>, description: impl Into<String>) -> Self {
        self.label = label.into();
        self.description = description.into();
        self
    }

    /// Set the default value.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Mark the parameter as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the inclusive lower bound.
    pub fn with_min(mut self, min: f64) -> Self {
        self.min_value = Some(min);
        self
    }

    /// Set the inclusive upper bound.
    pub fn with_max(mut self, max: f64) -> Self {
        self.max_value = Some(max);
        self
    }

    /// Set the allowed options for an enum parameter.
    pub fn with_options(mut self, options: &[&str]) -> Self {
        self.enum_options = Some(options.iter().map(|s| (*s).to_string()).collect());
        self
    }

    /// Only meaningful when `key` holds `value`.
    pub fn with_dependency(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.depends_on = Some((key.into(), value.into()));
        self
    }

    /// Set the physical units.
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn min_value(&self) -> Option<f64> {
        self.min_value
    }

    pub fn max_value(&self) -> Option<f64> {
        self.max_value
    }

    pub fn enum_options(&self) -> Option<&[String]> {
        self.enum_options.as_deref()
    }

    /// The `(key, required value)` this parameter depends on, if any.
    pub fn depends_on(&self) -> Option<(&str, &Value)> {
        self.depends_on.as_ref().map(|(k, v)| (k.as_str(), v))
    }

    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }
}

/// Ordered collection of parameter definitions, grouped by panel.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    groups: IndexMap<String, Vec<ParameterDefinition>>,
}

impl Schema {
    /// Build a schema from definitions; groups keep first-seen order.
    pub fn from_definitions(definitions: Vec<ParameterDefinition>) -> Self {
        let mut groups: IndexMap<String, Vec<ParameterDefinition>> = IndexMap::new();
        for def in definitions {
            groups.entry(def.group.clone()).or_default().push(def);
        }
        Self { groups }
    }

    /// The built-in REMORA parameter table.
    pub fn remora() -> Self {
        Self::from_definitions(remora_definitions())
    }

    /// Look up a parameter by key.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::UnknownParameter`] if no definition has `key`.
    pub fn parameter(&self, key: &str) -> Result<&ParameterDefinition, ParamError> {
        self.find(key).ok_or_else(|| ParamError::UnknownParameter {
            key: key.to_string(),
        })
    }

    /// Look up a parameter by key, returning `None` if it is not defined.
    pub fn find(&self, key: &str) -> Option<&ParameterDefinition> {
        self.definitions().find(|d| d.key == key)
    }

    /// All definitions in a group.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::UnknownGroup`] if the group does not exist.
    pub fn group(&self, name: &str) -> Result<&[ParameterDefinition], ParamError> {
        self.groups
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| ParamError::UnknownGroup {
                name: name.to_string(),
            })
    }

    /// Group names in declaration order.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Every definition, group by group.
    pub fn definitions(&self) -> impl Iterator<Item = &ParameterDefinition> {
        self.groups.values().flatten()
    }

    /// Default value declared for `key`, if the key is known and has one.
    pub fn default_for(&self, key: &str) -> Option<&Value> {
        self.find(key).and_then(ParameterDefinition::default)
    }

    /// Mapping of every key that declares a default to that default.
    pub fn defaults(&self) -> ParamMap {
        self.definitions()
            .filter_map(|d| d.default.clone().map(|v| (d.key.clone(), v)))
            .collect()
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Returns `true` if the schema has no definitions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

const BC_TYPES: &[&str] = &[
    "SlipWall",
    "NoSlipWall",
    "Outflow",
    "Clamped",
    "Chapman",
    "Flather",
    "Periodic",
    "Orlanski",
    "OrlankiNudg",
];

const ADVECTION_SCHEMES: &[&str] = &["upstream3", "centered4"];

fn remora_definitions() -> Vec<ParameterDefinition> {
    type Def = ParameterDefinition;
    type K = ParamKind;

    let mut defs = vec![
        // -- domain ----------------------------------------------------------
        Def::new("remora.prob_lo", "domain", K::FloatVec3)
            .with_label("Domain Lower Bound", "Lower corner of computational domain (x, y, z).")
            .with_default(vec![0.0, 0.0, -150.0])
            .required()
            .with_units("m"),
        Def::new("remora.prob_hi", "domain", K::FloatVec3)
            .with_label("Domain Upper Bound", "Upper corner of computational domain (x, y, z).")
            .with_default(vec![41000.0, 80000.0, 0.0])
            .required()
            .with_units("m"),
        Def::new("remora.n_cell", "domain", K::IntVec3)
            .with_label("Grid Cells", "Number of grid cells in each direction.")
            .with_default(vec![41, 80, 16])
            .required(),
        Def::new("remora.is_periodic", "domain", K::IntVec3)
            .with_label(
                "Periodicity",
                "Periodic boundary in each direction (1=periodic, 0=not).",
            )
            .with_default(vec![1, 0, 0])
            .required(),
        Def::new("remora.flat_bathymetry", "domain", K::Bool)
            .with_label("Flat Bathymetry", "If true, use flat bottom (no topography).")
            .with_default(false),
        // -- timing ----------------------------------------------------------
        Def::new("remora.max_step", "timing", K::Int)
            .with_label("Max Steps", "Total number of baroclinic time steps.")
            .with_default(10)
            .required()
            .with_min(1.0),
        Def::new("remora.fixed_dt", "timing", K::Float)
            .with_label("Fixed Time Step", "Baroclinic (3D) time step size.")
            .with_default(300.0)
            .required()
            .with_min(0.0)
            .with_units("s"),
        Def::new("remora.fixed_fast_dt", "timing", K::Float)
            .with_label(
                "Fast Time Step",
                "Barotropic (2D) sub-step size. Should evenly divide the fixed time step.",
            )
            .with_default(10.0)
            .required()
            .with_min(0.0)
            .with_units("s"),
        Def::new("remora.stop_time", "timing", K::Float)
            .with_label("Stop Time", "Alternative to max steps: stop at this physical time.")
            .with_min(0.0)
            .with_units("s"),
        // -- physics ---------------------------------------------------------
        Def::new("remora.R0", "physics", K::Float)
            .with_label("Reference Density", "Background density for equation of state.")
            .with_default(1027.0)
            .with_min(0.0)
            .with_units("kg/m³"),
        Def::new("remora.rho0", "physics", K::Float)
            .with_label("Mean Density", "Mean ocean density.")
            .with_default(1025.0)
            .with_min(0.0)
            .with_units("kg/m³"),
        Def::new("remora.S0", "physics", K::Float)
            .with_label("Reference Salinity", "Reference salinity for linear equation of state.")
            .with_default(35.0)
            .with_min(0.0)
            .with_units("PSU"),
        Def::new("remora.T0", "physics", K::Float)
            .with_label(
                "Reference Temperature",
                "Reference temperature for linear equation of state.",
            )
            .with_default(14.0)
            .with_units("°C"),
        Def::new("remora.Tcoef", "physics", K::Float)
            .with_label("Thermal Expansion Coeff", "Thermal expansion coefficient.")
            .with_default(1.7e-4)
            .with_min(0.0)
            .with_units("1/°C"),
        Def::new("remora.Scoef", "physics", K::Float)
            .with_label("Haline Contraction Coeff", "Haline contraction coefficient.")
            .with_default(0.0)
            .with_min(0.0)
            .with_units("1/PSU"),
        Def::new("remora.tcline", "physics", K::Float)
            .with_label("Thermocline Depth", "Thermocline depth for S-coordinate stretching.")
            .with_default(25.0)
            .with_min(0.0)
            .with_units("m"),
        Def::new("remora.use_coriolis", "physics", K::Bool)
            .with_label("Use Coriolis", "Enable Coriolis force.")
            .with_default(true),
        Def::new("remora.coriolis_type", "physics", K::Enum)
            .with_label("Coriolis Type", "Type of Coriolis parameterization.")
            .with_default("beta_plane")
            .with_options(&["beta_plane", "custom"])
            .with_dependency("remora.use_coriolis", true),
        Def::new("remora.coriolis_f0", "physics", K::Float)
            .with_label("Coriolis f₀", "Reference Coriolis parameter.")
            .with_default(-8.26e-5)
            .with_dependency("remora.use_coriolis", true)
            .with_units("1/s"),
        Def::new("remora.coriolis_beta", "physics", K::Float)
            .with_label("Coriolis β", "Beta-plane gradient.")
            .with_default(0.0)
            .with_dependency("remora.use_coriolis", true)
            .with_units("1/(m·s)"),
        Def::new("remora.use_gravity", "physics", K::Bool)
            .with_label("Use Gravity", "Enable gravitational acceleration.")
            .with_default(true),
        // -- mixing ----------------------------------------------------------
        Def::new("remora.vertical_mixing_type", "mixing", K::Enum)
            .with_label("Mixing Type", "Vertical mixing parameterization.")
            .with_default("gls")
            .with_options(&["gls", "analytic"]),
        Def::new("remora.gls_stability_type", "mixing", K::Enum)
            .with_label("GLS Stability Type", "GLS stability function.")
            .with_default("galperin")
            .with_options(&["galperin", "kantha_clayson"])
            .with_dependency("remora.vertical_mixing_type", "gls"),
        Def::new("remora.gls_P", "mixing", K::Float)
            .with_label("GLS p", "GLS parameter p.")
            .with_default(3.0)
            .with_dependency("remora.vertical_mixing_type", "gls"),
        Def::new("remora.gls_M", "mixing", K::Float)
            .with_label("GLS m", "GLS parameter m.")
            .with_default(1.5)
            .with_dependency("remora.vertical_mixing_type", "gls"),
        Def::new("remora.gls_N", "mixing", K::Float)
            .with_label("GLS n", "GLS parameter n.")
            .with_default(-1.0)
            .with_dependency("remora.vertical_mixing_type", "gls"),
        Def::new("remora.Akv_bak", "mixing", K::Float)
            .with_label("Background Viscosity", "Background vertical viscosity.")
            .with_default(1.0e-5)
            .with_min(0.0)
            .with_units("m²/s"),
        Def::new("remora.Akt_bak", "mixing", K::Float)
            .with_label(
                "Background Temp Diffusivity",
                "Background vertical diffusivity for temperature.",
            )
            .with_default(1.0e-6)
            .with_min(0.0)
            .with_units("m²/s"),
        Def::new("remora.Aks_bak", "mixing", K::Float)
            .with_label(
                "Background Salt Diffusivity",
                "Background vertical diffusivity for salinity.",
            )
            .with_default(1.0e-6)
            .with_min(0.0)
            .with_units("m²/s"),
        // -- advection -------------------------------------------------------
        Def::new("remora.tracer_horizontal_advection_scheme", "advection", K::Enum)
            .with_label("Tracer Horiz Advection", "Horizontal advection scheme for tracers.")
            .with_default("upstream3")
            .with_options(ADVECTION_SCHEMES),
        Def::new("remora.tracer_vertical_advection_scheme", "advection", K::Enum)
            .with_label("Tracer Vert Advection", "Vertical advection scheme for tracers.")
            .with_default("upstream3")
            .with_options(ADVECTION_SCHEMES),
    ];

    // -- boundary ------------------------------------------------------------
    for face in ["xlo", "xhi", "ylo", "yhi", "zlo", "zhi"] {
        defs.push(
            Def::new(format!("remora.bc.{face}.type"), "boundary", K::Enum)
                .with_label(
                    format!("BC {face}"),
                    format!("Boundary condition type for the {face} face."),
                )
                .with_default("SlipWall")
                .required()
                .with_options(BC_TYPES),
        );
    }

    defs.extend([
        // -- output ----------------------------------------------------------
        Def::new("remora.plot_file", "output", K::String)
            .with_label("Plot File Prefix", "Prefix for plotfile directory names.")
            .with_default("plt"),
        Def::new("remora.plot_int", "output", K::Int)
            .with_label("Plot Interval", "Steps between plotfile writes (-1 to disable).")
            .with_default(100)
            .with_min(-1.0),
        Def::new("remora.plotfile_type", "output", K::Enum)
            .with_label("Plot File Type", "Output format for plotfiles.")
            .with_default("amrex")
            .with_options(&["amrex", "netcdf", "hdf5"]),
        Def::new("remora.plot_vars_3d", "output", K::StringList)
            .with_label("3D Plot Variables", "Which 3D fields to output (space-separated).")
            .with_default(vec!["salt", "temp", "x_velocity", "y_velocity", "z_velocity"]),
        Def::new("remora.plot_vars_2d", "output", K::StringList)
            .with_label("2D Plot Variables", "Which 2D fields to output (space-separated).")
            .with_default(Value::List(Vec::new())),
        Def::new("remora.check_file", "output", K::String)
            .with_label("Checkpoint Prefix", "Prefix for checkpoint directories.")
            .with_default("chk"),
        Def::new("remora.check_int", "output", K::Int)
            .with_label(
                "Checkpoint Interval",
                "Steps between checkpoints (negative = wall-clock seconds).",
            )
            .with_default(-57600),
        Def::new("remora.write_history_file", "output", K::Bool)
            .with_label("Write History File", "Write NetCDF history file.")
            .with_default(false)
            .with_dependency("remora.plotfile_type", "netcdf"),
        Def::new("remora.sum_interval", "output", K::Int)
            .with_label("Diagnostic Interval", "Steps between diagnostic summaries.")
            .with_default(1)
            .with_min(0.0),
        Def::new("remora.v", "output", K::Int)
            .with_label("Verbosity", "Console output verbosity level.")
            .with_default(0)
            .with_min(0.0)
            .with_max(2.0),
        // -- parallel --------------------------------------------------------
        Def::new("amr.max_level", "parallel", K::Int)
            .with_label("Max AMR Level", "Maximum refinement level (0 = no AMR).")
            .with_default(0)
            .with_min(0.0),
        Def::new("amr.ref_ratio", "parallel", K::Int)
            .with_label("Refinement Ratio", "Grid refinement ratio between levels.")
            .with_default(2)
            .with_min(2.0)
            .with_max(4.0),
        Def::new("amr.max_grid_size", "parallel", K::Int)
            .with_label("Max Grid Size", "Max cells per grid box (affects load balancing).")
            .with_default(2048)
            .with_min(1.0),
        Def::new("amr.blocking_factor", "parallel", K::Int)
            .with_label(
                "Blocking Factor",
                "Grid cells must be divisible by this value (power of 2).",
            )
            .with_default(1)
            .with_min(1.0),
        // -- restart ---------------------------------------------------------
        Def::new("amr.restart", "restart", K::String)
            .with_label("Restart From", "Checkpoint directory to restart from.")
            .with_default(""),
    ]);

    defs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remora_schema_has_every_parameter() {
        let schema = Schema::remora();
        assert_eq!(schema.len(), 52);
        assert!(!schema.is_empty());
    }

    #[test]
    fn groups_in_declaration_order() {
        let schema = Schema::remora();
        let groups: Vec<&str> = schema.groups().collect();
        assert_eq!(
            groups,
            vec![
                "domain",
                "timing",
                "physics",
                "mixing",
                "advection",
                "boundary",
                "output",
                "parallel",
                "restart",
            ]
        );
    }

    #[test]
    fn keys_are_unique() {
        let schema = Schema::remora();
        let mut keys: Vec<&str> = schema.definitions().map(|d| d.key()).collect();
        let n = keys.len();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), n);
    }

    #[test]
    fn parameter_lookup() {
        let schema = Schema::remora();
        let p = schema.parameter("remora.fixed_dt").unwrap();
        assert_eq!(p.kind(), ParamKind::Float);
        assert_eq!(p.default(), Some(&Value::Float(300.0)));
        assert_eq!(p.min_value(), Some(0.0));
        assert_eq!(p.units(), Some("s"));
        assert!(p.is_required());
    }

    #[test]
    fn unknown_parameter_is_lookup_error() {
        let schema = Schema::remora();
        let err = schema.parameter("remora.nope").unwrap_err();
        assert!(matches!(err, ParamError::UnknownParameter { .. }));
    }

    #[test]
    fn group_lookup() {
        let schema = Schema::remora();
        assert_eq!(schema.group("boundary").unwrap().len(), 6);
        assert!(matches!(
            schema.group("chemistry"),
            Err(ParamError::UnknownGroup { .. })
        ));
    }

    #[test]
    fn defaults_skip_parameters_without_one() {
        let schema = Schema::remora();
        let defaults = schema.defaults();
        assert!(!defaults.contains_key("remora.stop_time"));
        assert_eq!(defaults["remora.n_cell"], Value::from(vec![41, 80, 16]));
        assert_eq!(defaults.len(), 51);
    }

    #[test]
    fn dependency_and_options() {
        let schema = Schema::remora();
        let p = schema.parameter("remora.gls_stability_type").unwrap();
        let (key, value) = p.depends_on().unwrap();
        assert_eq!(key, "remora.vertical_mixing_type");
        assert_eq!(value, &Value::from("gls"));
        assert_eq!(
            p.enum_options().unwrap(),
            &["galperin".to_string(), "kantha_clayson".to_string()]
        );
    }
}
