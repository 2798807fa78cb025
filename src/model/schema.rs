//! Schema tables for every SED-ML element kind.
//!
//! Each [`ElementKind`] describes its XML tag, the level/version range in
//! which it exists, its attributes, its list-of containers, its single child
//! elements and whether it carries MathML or a raw XML payload. The generic
//! element contract and the reader/writer are driven entirely by these tables.

use crate::core::level_version::{Availability, LevelVersion};

const L1V2: LevelVersion = LevelVersion::L1V2;
const L1V3: LevelVersion = LevelVersion::L1V3;
const L1V4: LevelVersion = LevelVersion::L1V4;

/// The value space of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrType {
    SId,
    SIdRef,
    MetaId,
    String,
    Kisao,
    Color,
    Int,
    Double,
    Bool,
    Enum(&'static [&'static str]),
}

impl AttrType {
    pub fn describe(&self) -> &'static str {
        match self {
            AttrType::SId => "SId",
            AttrType::SIdRef => "SIdRef",
            AttrType::MetaId => "ID",
            AttrType::String => "string",
            AttrType::Kisao => "KiSAO identifier",
            AttrType::Color => "colour",
            AttrType::Int => "integer",
            AttrType::Double => "double",
            AttrType::Bool => "boolean",
            AttrType::Enum(_) => "enumeration",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Optional,
    Required,
    /// Required up to and including the given pair, optional afterwards.
    RequiredUntil(LevelVersion),
}

/// One attribute of an element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrSpec {
    pub name: &'static str,
    pub ty: AttrType,
    pub requirement: Requirement,
    pub availability: Availability,
}

impl AttrSpec {
    pub const fn new(name: &'static str, ty: AttrType) -> Self {
        AttrSpec {
            name,
            ty,
            requirement: Requirement::Optional,
            availability: Availability::ALWAYS,
        }
    }

    pub const fn required(mut self) -> Self {
        self.requirement = Requirement::Required;
        self
    }

    pub const fn required_until(mut self, lv: LevelVersion) -> Self {
        self.requirement = Requirement::RequiredUntil(lv);
        self
    }

    pub const fn since(mut self, lv: LevelVersion) -> Self {
        self.availability.since = lv;
        self
    }

    pub const fn until(mut self, lv: LevelVersion) -> Self {
        self.availability.until = Some(lv);
        self
    }

    pub fn is_legal(&self, lv: LevelVersion) -> bool {
        self.availability.contains(lv)
    }

    pub fn is_required(&self, lv: LevelVersion) -> bool {
        self.is_legal(lv)
            && match self.requirement {
                Requirement::Optional => false,
                Requirement::Required => true,
                Requirement::RequiredUntil(until) => lv <= until,
            }
    }
}

/// Every element kind in the SED-ML object model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    Document,
    DataDescription,
    DataSource,
    Slice,
    Model,
    ChangeAttribute,
    AddXml,
    ChangeXml,
    RemoveXml,
    ComputeChange,
    UniformTimeCourse,
    OneStep,
    SteadyState,
    Analysis,
    Algorithm,
    AlgorithmParameter,
    Task,
    RepeatedTask,
    SubTask,
    UniformRange,
    VectorRange,
    FunctionalRange,
    DataRange,
    SetValue,
    ParameterEstimationTask,
    AdjustableParameter,
    Bounds,
    ExperimentReference,
    FitExperiment,
    FitMapping,
    LeastSquareObjectiveFunction,
    DataGenerator,
    Variable,
    AppliedDimension,
    Parameter,
    Report,
    Plot2D,
    Plot3D,
    Figure,
    SubPlot,
    Curve,
    ShadedArea,
    Surface,
    DataSet,
    Axis,
    Style,
    Line,
    Marker,
    Fill,
}

/// A list-of container and the kinds it may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListKind {
    DataDescriptions,
    DataSources,
    Slices,
    Models,
    ModelChanges,
    Simulations,
    AlgorithmParameters,
    Tasks,
    Ranges,
    TaskChanges,
    SubTasks,
    AdjustableParameters,
    ExperimentReferences,
    FitExperiments,
    FitMappings,
    DataGenerators,
    Variables,
    Parameters,
    AppliedDimensions,
    Outputs,
    SubPlots,
    Curves,
    Surfaces,
    DataSets,
    Styles,
}

/// A single (non-list) child element slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChildKind {
    Algorithm,
    Objective,
    Bounds,
    XAxis,
    YAxis,
    RightYAxis,
    ZAxis,
    Line,
    Marker,
    Fill,
}

/// A list owned by some element kind, with the range in which it is legal
/// for that owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSlot {
    pub list: ListKind,
    pub availability: Availability,
}

const fn list(list: ListKind) -> ListSlot {
    ListSlot {
        list,
        availability: Availability::ALWAYS,
    }
}

const fn list_since(list: ListKind, since: LevelVersion) -> ListSlot {
    ListSlot {
        list,
        availability: Availability::since(since),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildSlot {
    pub child: ChildKind,
    pub required: bool,
}

const fn child(child: ChildKind) -> ChildSlot {
    ChildSlot {
        child,
        required: false,
    }
}

const fn required_child(child: ChildKind) -> ChildSlot {
    ChildSlot {
        child,
        required: true,
    }
}

/// Where a kind's `id` and `name` attributes come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub since: LevelVersion,
    pub required: bool,
}

/// XML payload elements carried verbatim (not part of the SED-ML tree).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadSpec {
    pub tag: &'static str,
    pub required: bool,
}

use AttrType as T;

const SLICE_ATTRS: &[AttrSpec] = &[
    AttrSpec::new("reference", T::SIdRef).required(),
    AttrSpec::new("value", T::String),
    AttrSpec::new("index", T::SIdRef).since(L1V4),
    AttrSpec::new("startIndex", T::Int).since(L1V4),
    AttrSpec::new("endIndex", T::Int).since(L1V4),
];

const DATA_DESCRIPTION_ATTRS: &[AttrSpec] = &[
    AttrSpec::new("source", T::String).required(),
    AttrSpec::new("format", T::String),
];

const DATA_SOURCE_ATTRS: &[AttrSpec] = &[AttrSpec::new("indexSet", T::SIdRef)];

const MODEL_ATTRS: &[AttrSpec] = &[
    AttrSpec::new("language", T::String),
    AttrSpec::new("source", T::String).required(),
];

const TARGET_ATTRS: &[AttrSpec] = &[AttrSpec::new("target", T::String).required()];

const CHANGE_ATTRIBUTE_ATTRS: &[AttrSpec] = &[
    AttrSpec::new("target", T::String).required(),
    AttrSpec::new("newValue", T::String).required(),
];

const COMPUTE_CHANGE_ATTRS: &[AttrSpec] = &[
    AttrSpec::new("target", T::String).required(),
    AttrSpec::new("symbol", T::String).since(L1V4),
];

const UNIFORM_TIME_COURSE_ATTRS: &[AttrSpec] = &[
    AttrSpec::new("initialTime", T::Double).required(),
    AttrSpec::new("outputStartTime", T::Double).required(),
    AttrSpec::new("outputEndTime", T::Double).required(),
    AttrSpec::new("numberOfPoints", T::Int).required().until(L1V2),
    AttrSpec::new("numberOfSteps", T::Int).required().since(L1V3),
];

const ONE_STEP_ATTRS: &[AttrSpec] = &[AttrSpec::new("step", T::Double).required()];

const ALGORITHM_ATTRS: &[AttrSpec] = &[AttrSpec::new("kisaoID", T::Kisao).required()];

const ALGORITHM_PARAMETER_ATTRS: &[AttrSpec] = &[
    AttrSpec::new("kisaoID", T::Kisao).required(),
    AttrSpec::new("value", T::String).required(),
];

const TASK_ATTRS: &[AttrSpec] = &[
    AttrSpec::new("modelReference", T::SIdRef).required(),
    AttrSpec::new("simulationReference", T::SIdRef).required(),
];

const REPEATED_TASK_ATTRS: &[AttrSpec] = &[
    AttrSpec::new("range", T::SIdRef).required_until(L1V3),
    AttrSpec::new("resetModel", T::Bool).required_until(L1V3),
    AttrSpec::new("concatenate", T::Bool).since(L1V4),
];

const SUB_TASK_ATTRS: &[AttrSpec] = &[
    AttrSpec::new("task", T::SIdRef).required(),
    AttrSpec::new("order", T::Int),
];

const UNIFORM_RANGE_ATTRS: &[AttrSpec] = &[
    AttrSpec::new("start", T::Double).required(),
    AttrSpec::new("end", T::Double).required(),
    AttrSpec::new("numberOfPoints", T::Int).required().until(L1V2),
    AttrSpec::new("numberOfSteps", T::Int).required().since(L1V3),
    AttrSpec::new("type", T::Enum(&["linear", "log"])).required(),
];

const FUNCTIONAL_RANGE_ATTRS: &[AttrSpec] = &[AttrSpec::new("range", T::SIdRef)];

const DATA_RANGE_ATTRS: &[AttrSpec] = &[AttrSpec::new("sourceRef", T::SIdRef).required()];

const SET_VALUE_ATTRS: &[AttrSpec] = &[
    AttrSpec::new("modelReference", T::SIdRef).required(),
    AttrSpec::new("target", T::String),
    AttrSpec::new("symbol", T::String),
    AttrSpec::new("range", T::SIdRef),
];

const PARAMETER_ESTIMATION_TASK_ATTRS: &[AttrSpec] =
    &[AttrSpec::new("modelReference", T::SIdRef).required()];

const ADJUSTABLE_PARAMETER_ATTRS: &[AttrSpec] = &[
    AttrSpec::new("target", T::String).required(),
    AttrSpec::new("initialValue", T::Double),
    AttrSpec::new("modelReference", T::SIdRef),
];

const BOUNDS_ATTRS: &[AttrSpec] = &[
    AttrSpec::new("lowerBound", T::Double).required(),
    AttrSpec::new("upperBound", T::Double).required(),
    AttrSpec::new("scale", T::Enum(&["linear", "log", "log10"])).required(),
];

const EXPERIMENT_REFERENCE_ATTRS: &[AttrSpec] =
    &[AttrSpec::new("experiment", T::SIdRef).required()];

const FIT_EXPERIMENT_ATTRS: &[AttrSpec] =
    &[AttrSpec::new("type", T::Enum(&["steadyState", "timeCourse"]))];

const FIT_MAPPING_ATTRS: &[AttrSpec] = &[
    AttrSpec::new("dataSource", T::SIdRef).required(),
    AttrSpec::new("target", T::SIdRef).required(),
    AttrSpec::new(
        "type",
        T::Enum(&["time", "experimentalCondition", "observable"]),
    )
    .required(),
    AttrSpec::new("weight", T::Double),
    AttrSpec::new("pointWeight", T::SIdRef),
];

const VARIABLE_ATTRS: &[AttrSpec] = &[
    AttrSpec::new("target", T::String),
    AttrSpec::new("symbol", T::String),
    AttrSpec::new("taskReference", T::SIdRef),
    AttrSpec::new("modelReference", T::SIdRef),
    AttrSpec::new("term", T::String).since(L1V4),
    AttrSpec::new("dimensionTerm", T::String).since(L1V4),
];

const APPLIED_DIMENSION_ATTRS: &[AttrSpec] = &[
    AttrSpec::new("target", T::SIdRef),
    AttrSpec::new("dimensionTarget", T::String),
];

const PARAMETER_ATTRS: &[AttrSpec] = &[AttrSpec::new("value", T::Double).required()];

const PLOT_ATTRS: &[AttrSpec] = &[
    AttrSpec::new("legend", T::Bool).since(L1V4),
    AttrSpec::new("height", T::Double).since(L1V4),
    AttrSpec::new("width", T::Double).since(L1V4),
];

const FIGURE_ATTRS: &[AttrSpec] = &[
    AttrSpec::new("numRows", T::Int).required(),
    AttrSpec::new("numCols", T::Int).required(),
];

const SUB_PLOT_ATTRS: &[AttrSpec] = &[
    AttrSpec::new("plot", T::SIdRef).required(),
    AttrSpec::new("row", T::Int).required(),
    AttrSpec::new("col", T::Int).required(),
    AttrSpec::new("rowSpan", T::Int),
    AttrSpec::new("colSpan", T::Int),
];

const Y_AXIS_SIDE: AttrType = T::Enum(&["left", "right"]);

const CURVE_ATTRS: &[AttrSpec] = &[
    AttrSpec::new("logX", T::Bool).required().until(L1V3),
    AttrSpec::new("logY", T::Bool).required().until(L1V3),
    AttrSpec::new("xDataReference", T::SIdRef).required_until(L1V3),
    AttrSpec::new("yDataReference", T::SIdRef).required(),
    AttrSpec::new(
        "type",
        T::Enum(&[
            "points",
            "bar",
            "barStacked",
            "horizontalBar",
            "horizontalBarStacked",
        ]),
    )
    .since(L1V4),
    AttrSpec::new("order", T::Int).since(L1V4),
    AttrSpec::new("style", T::SIdRef).since(L1V4),
    AttrSpec::new("yAxis", Y_AXIS_SIDE).since(L1V4),
    AttrSpec::new("xErrorUpper", T::SIdRef).since(L1V4),
    AttrSpec::new("xErrorLower", T::SIdRef).since(L1V4),
    AttrSpec::new("yErrorUpper", T::SIdRef).since(L1V4),
    AttrSpec::new("yErrorLower", T::SIdRef).since(L1V4),
];

const SHADED_AREA_ATTRS: &[AttrSpec] = &[
    AttrSpec::new("xDataReference", T::SIdRef).required(),
    AttrSpec::new("yDataReferenceFrom", T::SIdRef).required(),
    AttrSpec::new("yDataReferenceTo", T::SIdRef).required(),
    AttrSpec::new("order", T::Int),
    AttrSpec::new("style", T::SIdRef),
    AttrSpec::new("yAxis", Y_AXIS_SIDE),
];

const SURFACE_ATTRS: &[AttrSpec] = &[
    AttrSpec::new("logX", T::Bool).required().until(L1V3),
    AttrSpec::new("logY", T::Bool).required().until(L1V3),
    AttrSpec::new("logZ", T::Bool).required().until(L1V3),
    AttrSpec::new("xDataReference", T::SIdRef).required(),
    AttrSpec::new("yDataReference", T::SIdRef).required(),
    AttrSpec::new("zDataReference", T::SIdRef).required(),
    AttrSpec::new(
        "type",
        T::Enum(&[
            "parametricCurve",
            "surfaceMesh",
            "surfaceContour",
            "contour",
            "heatMap",
            "stackedCurves",
            "bar",
        ]),
    )
    .since(L1V4),
    AttrSpec::new("style", T::SIdRef).since(L1V4),
    AttrSpec::new("order", T::Int).since(L1V4),
];

const DATA_SET_ATTRS: &[AttrSpec] = &[
    AttrSpec::new("label", T::String).required(),
    AttrSpec::new("dataReference", T::SIdRef).required(),
];

const AXIS_ATTRS: &[AttrSpec] = &[
    AttrSpec::new("type", T::Enum(&["linear", "log10"])).required(),
    AttrSpec::new("min", T::Double),
    AttrSpec::new("max", T::Double),
    AttrSpec::new("grid", T::Bool),
    AttrSpec::new("reverse", T::Bool),
    AttrSpec::new("style", T::SIdRef),
];

const STYLE_ATTRS: &[AttrSpec] = &[AttrSpec::new("baseStyle", T::SIdRef)];

const LINE_ATTRS: &[AttrSpec] = &[
    AttrSpec::new(
        "type",
        T::Enum(&["none", "solid", "dash", "dot", "dashDot", "dashDotDot"]),
    ),
    AttrSpec::new("color", T::Color),
    AttrSpec::new("thickness", T::Double),
];

const MARKER_ATTRS: &[AttrSpec] = &[
    AttrSpec::new("size", T::Double),
    AttrSpec::new(
        "type",
        T::Enum(&[
            "none",
            "square",
            "circle",
            "diamond",
            "xCross",
            "plus",
            "star",
            "triangleUp",
            "triangleDown",
            "triangleLeft",
            "triangleRight",
            "hDash",
            "vDash",
        ]),
    ),
    AttrSpec::new("fill", T::Color),
    AttrSpec::new("lineColor", T::Color),
    AttrSpec::new("lineThickness", T::Double),
];

const FILL_ATTRS: &[AttrSpec] = &[AttrSpec::new("color", T::Color)];

const NO_ATTRS: &[AttrSpec] = &[];
const NO_LISTS: &[ListSlot] = &[];
const NO_CHILDREN: &[ChildSlot] = &[];

const SIMULATION_CHILDREN: &[ChildSlot] = &[required_child(ChildKind::Algorithm)];
const PARAMETER_ESTIMATION_TASK_CHILDREN: &[ChildSlot] = &[
    required_child(ChildKind::Algorithm),
    required_child(ChildKind::Objective),
];
const ADJUSTABLE_PARAMETER_CHILDREN: &[ChildSlot] = &[required_child(ChildKind::Bounds)];
const FIT_EXPERIMENT_CHILDREN: &[ChildSlot] = &[child(ChildKind::Algorithm)];
const PLOT2D_CHILDREN: &[ChildSlot] = &[
    child(ChildKind::XAxis),
    child(ChildKind::YAxis),
    child(ChildKind::RightYAxis),
];
const PLOT3D_CHILDREN: &[ChildSlot] = &[
    child(ChildKind::XAxis),
    child(ChildKind::YAxis),
    child(ChildKind::ZAxis),
];
const STYLE_CHILDREN: &[ChildSlot] = &[
    child(ChildKind::Line),
    child(ChildKind::Marker),
    child(ChildKind::Fill),
];

const DOCUMENT_LISTS: &[ListSlot] = &[
    list_since(ListKind::DataDescriptions, L1V2),
    list(ListKind::Models),
    list(ListKind::Simulations),
    list(ListKind::Tasks),
    list(ListKind::DataGenerators),
    list(ListKind::Outputs),
    list_since(ListKind::Styles, L1V4),
    list_since(ListKind::AlgorithmParameters, L1V4),
];
const DATA_DESCRIPTION_LISTS: &[ListSlot] = &[list(ListKind::DataSources)];
const DATA_SOURCE_LISTS: &[ListSlot] = &[list(ListKind::Slices)];
const MODEL_LISTS: &[ListSlot] = &[list(ListKind::ModelChanges)];
const VARIABLES_AND_PARAMETERS: &[ListSlot] =
    &[list(ListKind::Variables), list(ListKind::Parameters)];
const ALGORITHM_LISTS: &[ListSlot] = &[list_since(ListKind::AlgorithmParameters, L1V2)];
const ALGORITHM_PARAMETER_LISTS: &[ListSlot] =
    &[list_since(ListKind::AlgorithmParameters, L1V4)];
const REPEATED_TASK_LISTS: &[ListSlot] = &[
    list(ListKind::Ranges),
    list(ListKind::TaskChanges),
    list(ListKind::SubTasks),
];
const SUB_TASK_LISTS: &[ListSlot] = &[list_since(ListKind::TaskChanges, L1V4)];
const PARAMETER_ESTIMATION_TASK_LISTS: &[ListSlot] = &[
    list(ListKind::AdjustableParameters),
    list(ListKind::FitExperiments),
];
const ADJUSTABLE_PARAMETER_LISTS: &[ListSlot] = &[list(ListKind::ExperimentReferences)];
const FIT_EXPERIMENT_LISTS: &[ListSlot] = &[list(ListKind::FitMappings)];
const VARIABLE_LISTS: &[ListSlot] = &[list_since(ListKind::AppliedDimensions, L1V4)];
const REPORT_LISTS: &[ListSlot] = &[list(ListKind::DataSets)];
const PLOT2D_LISTS: &[ListSlot] = &[list(ListKind::Curves)];
const PLOT3D_LISTS: &[ListSlot] = &[list(ListKind::Surfaces)];
const FIGURE_LISTS: &[ListSlot] = &[list(ListKind::SubPlots)];

impl ElementKind {
    /// All kinds, in schema order.
    pub const ALL: [ElementKind; 49] = [
        ElementKind::Document,
        ElementKind::DataDescription,
        ElementKind::DataSource,
        ElementKind::Slice,
        ElementKind::Model,
        ElementKind::ChangeAttribute,
        ElementKind::AddXml,
        ElementKind::ChangeXml,
        ElementKind::RemoveXml,
        ElementKind::ComputeChange,
        ElementKind::UniformTimeCourse,
        ElementKind::OneStep,
        ElementKind::SteadyState,
        ElementKind::Analysis,
        ElementKind::Algorithm,
        ElementKind::AlgorithmParameter,
        ElementKind::Task,
        ElementKind::RepeatedTask,
        ElementKind::SubTask,
        ElementKind::UniformRange,
        ElementKind::VectorRange,
        ElementKind::FunctionalRange,
        ElementKind::DataRange,
        ElementKind::SetValue,
        ElementKind::ParameterEstimationTask,
        ElementKind::AdjustableParameter,
        ElementKind::Bounds,
        ElementKind::ExperimentReference,
        ElementKind::FitExperiment,
        ElementKind::FitMapping,
        ElementKind::LeastSquareObjectiveFunction,
        ElementKind::DataGenerator,
        ElementKind::Variable,
        ElementKind::AppliedDimension,
        ElementKind::Parameter,
        ElementKind::Report,
        ElementKind::Plot2D,
        ElementKind::Plot3D,
        ElementKind::Figure,
        ElementKind::SubPlot,
        ElementKind::Curve,
        ElementKind::ShadedArea,
        ElementKind::Surface,
        ElementKind::DataSet,
        ElementKind::Axis,
        ElementKind::Style,
        ElementKind::Line,
        ElementKind::Marker,
        ElementKind::Fill,
    ];

    /// The XML tag used when this kind appears inside a list-of container.
    ///
    /// Axes only ever appear as named child slots (`xAxis`, `yAxis`, ...), so
    /// their tag here is a generic placeholder.
    pub fn tag(&self) -> &'static str {
        use ElementKind::*;
        match self {
            Document => "sedML",
            DataDescription => "dataDescription",
            DataSource => "dataSource",
            Slice => "slice",
            Model => "model",
            ChangeAttribute => "changeAttribute",
            AddXml => "addXML",
            ChangeXml => "changeXML",
            RemoveXml => "removeXML",
            ComputeChange => "computeChange",
            UniformTimeCourse => "uniformTimeCourse",
            OneStep => "oneStep",
            SteadyState => "steadyState",
            Analysis => "analysis",
            Algorithm => "algorithm",
            AlgorithmParameter => "algorithmParameter",
            Task => "task",
            RepeatedTask => "repeatedTask",
            SubTask => "subTask",
            UniformRange => "uniformRange",
            VectorRange => "vectorRange",
            FunctionalRange => "functionalRange",
            DataRange => "dataRange",
            SetValue => "setValue",
            ParameterEstimationTask => "parameterEstimationTask",
            AdjustableParameter => "adjustableParameter",
            Bounds => "bounds",
            ExperimentReference => "experimentReference",
            FitExperiment => "fitExperiment",
            FitMapping => "fitMapping",
            LeastSquareObjectiveFunction => "leastSquareObjectiveFunction",
            DataGenerator => "dataGenerator",
            Variable => "variable",
            AppliedDimension => "appliedDimension",
            Parameter => "parameter",
            Report => "report",
            Plot2D => "plot2D",
            Plot3D => "plot3D",
            Figure => "figure",
            SubPlot => "subPlot",
            Curve => "curve",
            ShadedArea => "shadedArea",
            Surface => "surface",
            DataSet => "dataSet",
            Axis => "axis",
            Style => "style",
            Line => "line",
            Marker => "marker",
            Fill => "fill",
        }
    }

    /// The range of pairs in which this kind exists.
    pub fn availability(&self) -> Availability {
        use ElementKind::*;
        match self {
            DataDescription | DataSource | Slice | ComputeChange | OneStep | SteadyState
            | AlgorithmParameter | RepeatedTask | SubTask | UniformRange | VectorRange
            | FunctionalRange | SetValue => Availability::since(L1V2),
            Analysis | DataRange | ParameterEstimationTask | AdjustableParameter | Bounds
            | ExperimentReference | FitExperiment | FitMapping | LeastSquareObjectiveFunction
            | AppliedDimension | Figure | SubPlot | ShadedArea | Axis | Style | Line | Marker
            | Fill => Availability::since(L1V4),
            _ => Availability::ALWAYS,
        }
    }

    pub fn is_legal(&self, lv: LevelVersion) -> bool {
        self.availability().contains(lv)
    }

    /// When `id`/`name` became legal for this kind, and whether `id` is required.
    pub fn identity(&self) -> Identity {
        use ElementKind::*;
        let identified = |required| Identity {
            since: self.availability().since,
            required,
        };
        match self {
            DataDescription | DataSource | Model | UniformTimeCourse | OneStep | SteadyState
            | Analysis | Task | RepeatedTask | ParameterEstimationTask | UniformRange
            | VectorRange | FunctionalRange | DataRange | DataGenerator | Variable
            | Parameter | Report | Plot2D | Plot3D | Figure | Curve | Surface | DataSet
            | Style | FitExperiment => identified(true),
            ShadedArea => identified(false),
            _ => Identity {
                since: L1V4,
                required: false,
            },
        }
    }

    /// Kind-specific attributes, excluding `metaid`, `id` and `name`.
    pub fn own_attributes(&self) -> &'static [AttrSpec] {
        use ElementKind::*;
        match self {
            Document => NO_ATTRS,
            DataDescription => DATA_DESCRIPTION_ATTRS,
            DataSource => DATA_SOURCE_ATTRS,
            Slice => SLICE_ATTRS,
            Model => MODEL_ATTRS,
            ChangeAttribute => CHANGE_ATTRIBUTE_ATTRS,
            AddXml | ChangeXml | RemoveXml => TARGET_ATTRS,
            ComputeChange => COMPUTE_CHANGE_ATTRS,
            UniformTimeCourse => UNIFORM_TIME_COURSE_ATTRS,
            OneStep => ONE_STEP_ATTRS,
            SteadyState | Analysis => NO_ATTRS,
            Algorithm => ALGORITHM_ATTRS,
            AlgorithmParameter => ALGORITHM_PARAMETER_ATTRS,
            Task => TASK_ATTRS,
            RepeatedTask => REPEATED_TASK_ATTRS,
            SubTask => SUB_TASK_ATTRS,
            UniformRange => UNIFORM_RANGE_ATTRS,
            VectorRange => NO_ATTRS,
            FunctionalRange => FUNCTIONAL_RANGE_ATTRS,
            DataRange => DATA_RANGE_ATTRS,
            SetValue => SET_VALUE_ATTRS,
            ParameterEstimationTask => PARAMETER_ESTIMATION_TASK_ATTRS,
            AdjustableParameter => ADJUSTABLE_PARAMETER_ATTRS,
            Bounds => BOUNDS_ATTRS,
            ExperimentReference => EXPERIMENT_REFERENCE_ATTRS,
            FitExperiment => FIT_EXPERIMENT_ATTRS,
            FitMapping => FIT_MAPPING_ATTRS,
            LeastSquareObjectiveFunction => NO_ATTRS,
            DataGenerator => NO_ATTRS,
            Variable => VARIABLE_ATTRS,
            AppliedDimension => APPLIED_DIMENSION_ATTRS,
            Parameter => PARAMETER_ATTRS,
            Report => NO_ATTRS,
            Plot2D | Plot3D => PLOT_ATTRS,
            Figure => FIGURE_ATTRS,
            SubPlot => SUB_PLOT_ATTRS,
            Curve => CURVE_ATTRS,
            ShadedArea => SHADED_AREA_ATTRS,
            Surface => SURFACE_ATTRS,
            DataSet => DATA_SET_ATTRS,
            Axis => AXIS_ATTRS,
            Style => STYLE_ATTRS,
            Line => LINE_ATTRS,
            Marker => MARKER_ATTRS,
            Fill => FILL_ATTRS,
        }
    }

    /// The shared `metaid`, `id` and `name` attributes as they apply to this kind.
    pub fn base_attributes(&self) -> [AttrSpec; 3] {
        let identity = self.identity();
        let id = AttrSpec::new("id", T::SId).since(identity.since);
        let id = if identity.required { id.required() } else { id };
        [
            AttrSpec::new("metaid", T::MetaId),
            id,
            AttrSpec::new("name", T::String).since(identity.since),
        ]
    }

    /// Every attribute of this kind, base attributes first.
    pub fn attributes(&self) -> impl Iterator<Item = AttrSpec> {
        self.base_attributes()
            .into_iter()
            .chain(self.own_attributes().iter().copied())
    }

    pub fn attribute(&self, name: &str) -> Option<AttrSpec> {
        self.attributes().find(|spec| spec.name == name)
    }

    pub fn lists(&self) -> &'static [ListSlot] {
        use ElementKind::*;
        match self {
            Document => DOCUMENT_LISTS,
            DataDescription => DATA_DESCRIPTION_LISTS,
            DataSource => DATA_SOURCE_LISTS,
            Model => MODEL_LISTS,
            ComputeChange | FunctionalRange | DataGenerator => VARIABLES_AND_PARAMETERS,
            Algorithm => ALGORITHM_LISTS,
            AlgorithmParameter => ALGORITHM_PARAMETER_LISTS,
            RepeatedTask => REPEATED_TASK_LISTS,
            SubTask => SUB_TASK_LISTS,
            ParameterEstimationTask => PARAMETER_ESTIMATION_TASK_LISTS,
            AdjustableParameter => ADJUSTABLE_PARAMETER_LISTS,
            FitExperiment => FIT_EXPERIMENT_LISTS,
            Variable => VARIABLE_LISTS,
            Report => REPORT_LISTS,
            Plot2D => PLOT2D_LISTS,
            Plot3D => PLOT3D_LISTS,
            Figure => FIGURE_LISTS,
            _ => NO_LISTS,
        }
    }

    pub fn list_slot(&self, list: ListKind) -> Option<ListSlot> {
        self.lists().iter().copied().find(|slot| slot.list == list)
    }

    pub fn children(&self) -> &'static [ChildSlot] {
        use ElementKind::*;
        match self {
            UniformTimeCourse | OneStep | SteadyState | Analysis => SIMULATION_CHILDREN,
            ParameterEstimationTask => PARAMETER_ESTIMATION_TASK_CHILDREN,
            AdjustableParameter => ADJUSTABLE_PARAMETER_CHILDREN,
            FitExperiment => FIT_EXPERIMENT_CHILDREN,
            Plot2D => PLOT2D_CHILDREN,
            Plot3D => PLOT3D_CHILDREN,
            Style => STYLE_CHILDREN,
            _ => NO_CHILDREN,
        }
    }

    pub fn child_slot(&self, child: ChildKind) -> Option<ChildSlot> {
        self.children().iter().copied().find(|slot| slot.child == child)
    }

    /// Whether a `<math>` child is part of this kind, and if so whether it is required.
    pub fn math(&self) -> Option<bool> {
        use ElementKind::*;
        match self {
            DataGenerator | ComputeChange | FunctionalRange | SetValue => Some(true),
            _ => None,
        }
    }

    /// Verbatim XML payload carried by this kind.
    pub fn payload(&self) -> Option<PayloadSpec> {
        use ElementKind::*;
        match self {
            AddXml | ChangeXml => Some(PayloadSpec {
                tag: "newXML",
                required: true,
            }),
            DataDescription => Some(PayloadSpec {
                tag: "dimensionDescription",
                required: false,
            }),
            _ => None,
        }
    }

    /// Whether this kind carries an ordered list of `<value>` numbers.
    pub fn has_values(&self) -> bool {
        matches!(self, ElementKind::VectorRange)
    }
}

impl ListKind {
    pub fn tag(&self) -> &'static str {
        use ListKind::*;
        match self {
            DataDescriptions => "listOfDataDescriptions",
            DataSources => "listOfDataSources",
            Slices => "listOfSlices",
            Models => "listOfModels",
            ModelChanges | TaskChanges => "listOfChanges",
            Simulations => "listOfSimulations",
            AlgorithmParameters => "listOfAlgorithmParameters",
            Tasks => "listOfTasks",
            Ranges => "listOfRanges",
            SubTasks => "listOfSubTasks",
            AdjustableParameters => "listOfAdjustableParameters",
            ExperimentReferences => "listOfExperimentReferences",
            FitExperiments => "listOfFitExperiments",
            FitMappings => "listOfFitMappings",
            DataGenerators => "listOfDataGenerators",
            Variables => "listOfVariables",
            Parameters => "listOfParameters",
            AppliedDimensions => "listOfAppliedDimensions",
            Outputs => "listOfOutputs",
            SubPlots => "listOfSubPlots",
            Curves => "listOfCurves",
            Surfaces => "listOfSurfaces",
            DataSets => "listOfDataSets",
            Styles => "listOfStyles",
        }
    }

    /// The kinds an instance of this list may hold.
    pub fn item_kinds(&self) -> &'static [ElementKind] {
        use ElementKind as K;
        use ListKind::*;
        match self {
            DataDescriptions => &[K::DataDescription],
            DataSources => &[K::DataSource],
            Slices => &[K::Slice],
            Models => &[K::Model],
            ModelChanges => &[
                K::ChangeAttribute,
                K::AddXml,
                K::ChangeXml,
                K::RemoveXml,
                K::ComputeChange,
            ],
            Simulations => &[K::UniformTimeCourse, K::OneStep, K::SteadyState, K::Analysis],
            AlgorithmParameters => &[K::AlgorithmParameter],
            Tasks => &[K::Task, K::RepeatedTask, K::ParameterEstimationTask],
            Ranges => &[K::UniformRange, K::VectorRange, K::FunctionalRange, K::DataRange],
            TaskChanges => &[K::SetValue],
            SubTasks => &[K::SubTask],
            AdjustableParameters => &[K::AdjustableParameter],
            ExperimentReferences => &[K::ExperimentReference],
            FitExperiments => &[K::FitExperiment],
            FitMappings => &[K::FitMapping],
            DataGenerators => &[K::DataGenerator],
            Variables => &[K::Variable],
            Parameters => &[K::Parameter],
            AppliedDimensions => &[K::AppliedDimension],
            Outputs => &[K::Report, K::Plot2D, K::Plot3D, K::Figure],
            SubPlots => &[K::SubPlot],
            Curves => &[K::Curve, K::ShadedArea],
            Surfaces => &[K::Surface],
            DataSets => &[K::DataSet],
            Styles => &[K::Style],
        }
    }

    pub fn accepts(&self, kind: ElementKind) -> bool {
        self.item_kinds().contains(&kind)
    }

    /// Find the item kind for a child tag of this list.
    pub fn item_kind_for_tag(&self, tag: &str) -> Option<ElementKind> {
        self.item_kinds().iter().copied().find(|k| k.tag() == tag)
    }

    /// Whether items carry an `order` attribute that overrides document order.
    pub fn is_ordered(&self) -> bool {
        matches!(self, ListKind::Curves | ListKind::Surfaces | ListKind::SubTasks)
    }
}

impl ChildKind {
    pub fn tag(&self) -> &'static str {
        use ChildKind::*;
        match self {
            Algorithm => "algorithm",
            Objective => "leastSquareObjectiveFunction",
            Bounds => "bounds",
            XAxis => "xAxis",
            YAxis => "yAxis",
            RightYAxis => "rightYAxis",
            ZAxis => "zAxis",
            Line => "line",
            Marker => "marker",
            Fill => "fill",
        }
    }

    pub fn element_kind(&self) -> ElementKind {
        use ChildKind::*;
        match self {
            Algorithm => ElementKind::Algorithm,
            Objective => ElementKind::LeastSquareObjectiveFunction,
            Bounds => ElementKind::Bounds,
            XAxis | YAxis | RightYAxis | ZAxis => ElementKind::Axis,
            Line => ElementKind::Line,
            Marker => ElementKind::Marker,
            Fill => ElementKind::Fill,
        }
    }
}
