use serde::Deserialize;

use super::deserializers::{
    cdata, comma_separated, error_flag, lenient_bool, lenient_f64, lenient_i32, lenient_u32,
    opt_lenient_f64, single_or_vec,
};

/// Wire envelope: every Full Results document is rooted at `queryresult`.
#[derive(Debug, Deserialize)]
pub(crate) struct QueryResultEnvelope {
    pub queryresult: QueryResult,
}

/// The entire result of one Full Results query. `queryresult` is a
/// superelement of all others.
///
/// A decoded value is read-only; every call produces a fresh tree and nothing
/// is shared between requests.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResult {
    /// Whether the input could be successfully understood. If false there
    /// will be no pods.
    #[serde(deserialize_with = "lenient_bool")]
    pub success: bool,
    /// Whether a serious processing error occurred, such as a missing
    /// required parameter. If true there will be no pod content.
    #[serde(deserialize_with = "error_flag")]
    pub error: bool,
    /// The number of pods
    #[serde(deserialize_with = "lenient_u32")]
    pub numpods: u32,
    /// The version specification of the API on the server that produced this
    /// result
    pub version: String,
    /// Categories and types of data represented in the results
    /// (e.g. "Financial")
    #[serde(default, deserialize_with = "comma_separated")]
    pub datatypes: Vec<String>,
    /// The wall-clock time in seconds required to generate the output
    #[serde(deserialize_with = "lenient_f64")]
    pub timing: f64,
    /// Names of the scanners that timed out. Empty when every scanner
    /// finished within its budget.
    #[serde(deserialize_with = "comma_separated")]
    pub timedout: Vec<String>,
    /// The time in seconds required by the parsing phase
    #[serde(default, deserialize_with = "opt_lenient_f64")]
    pub parsetiming: Option<f64>,
    /// Whether the parsing stage timed out (try a longer parsetimeout if
    /// true)
    #[serde(default, deserialize_with = "lenient_bool")]
    pub parsetimedout: bool,
    /// A URL to use to recalculate the query and get more pods
    #[serde(default)]
    pub recalculate: Option<String>,
    /// The main output of the Full Results API. Each pod contains one piece
    /// or category of information about the query.
    #[serde(rename = "pod", default, deserialize_with = "single_or_vec")]
    pub pods: Vec<Pod>,
    /// Disambiguation choices the server made implicitly, each re-appliable
    /// through the `assumption` request parameter
    #[serde(default)]
    pub assumptions: Option<Assumptions>,
}

impl QueryResult {
    /// The pod tagged as the primary result, if the server marked one.
    pub fn primary_pod(&self) -> Option<&Pod> {
        self.pods.iter().find(|pod| pod.primary)
    }

    /// Whether every count attribute agrees with the size of the collection
    /// it describes.
    pub fn is_consistent(&self) -> bool {
        self.numpods as usize == self.pods.len()
            && self.pods.iter().all(Pod::is_consistent)
            && self
                .assumptions
                .as_ref()
                .is_none_or(Assumptions::is_consistent)
    }
}

/// A titled section of the result, e.g. "Result" or "Input interpretation".
#[derive(Debug, Clone, Deserialize)]
pub struct Pod {
    /// The pod title, used to identify the pod and its contents
    pub title: String,
    /// Whether a processing error occurred with this specific pod
    #[serde(default, deserialize_with = "lenient_bool")]
    pub error: bool,
    /// Intended position in a visual display, typically a multiple of 100
    /// forming an increasing top-to-bottom sequence
    #[serde(deserialize_with = "lenient_i32")]
    pub position: i32,
    /// The name of the scanner that produced this pod, a general guide to the
    /// type of data it holds
    pub scanner: String,
    /// A unique identifier, used for selecting specific pods to include or
    /// exclude
    pub id: String,
    /// The number of subpod elements present
    #[serde(deserialize_with = "lenient_u32")]
    pub numsubpods: u32,
    /// Set on the pod that is the closest thing to a simple "answer" for the
    /// query, when the server designates one
    #[serde(default, deserialize_with = "lenient_bool")]
    pub primary: bool,
    #[serde(rename = "subpod", default, deserialize_with = "single_or_vec")]
    pub subpods: Vec<Subpod>,
    /// Present when sound output was requested
    #[serde(default)]
    pub sounds: Option<Sounds>,
    /// Alternative states for this pod, each simulating a button click on the
    /// website
    #[serde(default)]
    pub states: Option<States>,
    /// Present when the pod is a stub: its content exceeded the async time
    /// budget and must be fetched from this URL in a follow-up call
    #[serde(rename = "async", default)]
    pub async_url: Option<String>,
}

impl Pod {
    pub fn is_consistent(&self) -> bool {
        self.numsubpods as usize == self.subpods.len()
            && self.sounds.as_ref().is_none_or(Sounds::is_consistent)
            && self.states.as_ref().is_none_or(States::is_consistent)
    }
}

/// One content unit within a pod. Which fields are populated depends on the
/// formats requested with the query.
#[derive(Debug, Clone, Deserialize)]
pub struct Subpod {
    /// Usually an empty string because most subpods have no title
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub primary: bool,
    #[serde(default)]
    pub img: Option<Image>,
    /// Clickable-region metadata, populated only when the imagemap format was
    /// requested
    #[serde(rename = "imagemap", default)]
    pub image_map: Option<ImageMap>,
    #[serde(default)]
    pub plaintext: Option<String>,
    /// Wolfram Language input form that regenerates this result
    #[serde(default)]
    pub minput: Option<String>,
    /// Wolfram Language output form of this result. Not available for all
    /// results and sometimes large.
    #[serde(default)]
    pub moutput: Option<String>,
    #[serde(default)]
    pub cell: Option<Cell>,
    /// Opaque MathML fragment; kept unparsed
    #[serde(rename = "mathml", default)]
    pub mathml: Option<serde_json::Value>,
    /// Subpod-level state changes; most podstate changes are per-pod, a few
    /// queries expose them per-subpod
    #[serde(default)]
    pub states: Option<States>,
}

/// A stored image giving a visual representation of a single subpod.
#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub title: String,
    #[serde(deserialize_with = "lenient_u32")]
    pub width: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub height: u32,
}

/// Clickable areas within a subpod image.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageMap {
    #[serde(rename = "rect", default, deserialize_with = "single_or_vec")]
    pub rectangles: Vec<ImageRectangle>,
}

/// Corners of one clickable area, with the top-left corner as the origin.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageRectangle {
    #[serde(deserialize_with = "lenient_i32")]
    pub left: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub right: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub top: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub bottom: i32,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub assumptions: String,
    #[serde(default)]
    pub title: String,
}

/// A Wolfram Language Cell expression rendering the same output as the
/// website for a single subpod. The payload ships wrapped in a CDATA literal;
/// [`Cell::data`] holds the unwrapped expression.
#[derive(Debug, Clone, Deserialize)]
pub struct Cell {
    #[serde(default, deserialize_with = "lenient_bool")]
    pub compressed: bool,
    #[serde(deserialize_with = "cdata")]
    pub data: String,
}

/// Sound files giving an audio representation of a single subpod. Only
/// present when the requested formats include sound or wav.
#[derive(Debug, Clone, Deserialize)]
pub struct Sounds {
    #[serde(deserialize_with = "lenient_u32")]
    pub count: u32,
    #[serde(rename = "sound", default, deserialize_with = "single_or_vec")]
    pub sounds: Vec<Sound>,
}

impl Sounds {
    pub fn is_consistent(&self) -> bool {
        self.count as usize == self.sounds.len()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sound {
    pub url: String,
    #[serde(rename = "type")]
    pub audio_type: AudioType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum AudioType {
    #[serde(rename = "audio/wav")]
    Wav,
    #[serde(rename = "audio/midi")]
    Midi,
}

/// All the alternative states available for a pod or subpod. The name of
/// each state matches the button text on the website; passing a state's
/// `input` value through the `podstate` parameter invokes it.
///
/// Flat states simulate single buttons. When some states are logically
/// grouped into a popup menu, the group arrives as a nested [`StateList`]
/// that counts as one entry of `count`.
#[derive(Debug, Clone, Deserialize)]
pub struct States {
    #[serde(deserialize_with = "lenient_u32")]
    pub count: u32,
    #[serde(rename = "state", default, deserialize_with = "single_or_vec")]
    pub states: Vec<State>,
    #[serde(rename = "statelist", default)]
    pub state_list: Option<StateList>,
}

impl States {
    /// The group control, when present, occupies one slot of `count`.
    pub fn is_consistent(&self) -> bool {
        match &self.state_list {
            Some(list) => {
                self.states.len() + 1 == self.count as usize && list.is_consistent()
            }
            None => self.states.len() == self.count as usize,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct State {
    pub name: String,
    /// Token to replay through the `podstate` parameter to invoke this state
    pub input: String,
}

/// A group of states presented as a popup menu on the website, e.g. the time
/// period selector of a weather chart.
#[derive(Debug, Clone, Deserialize)]
pub struct StateList {
    #[serde(deserialize_with = "lenient_u32")]
    pub count: u32,
    /// The currently selected state name
    pub value: String,
    #[serde(default)]
    pub delimiters: String,
    #[serde(rename = "state", default, deserialize_with = "single_or_vec")]
    pub states: Vec<State>,
}

impl StateList {
    pub fn is_consistent(&self) -> bool {
        self.count as usize == self.states.len()
    }
}

/// The assumptions the server made while interpreting the query, each with
/// the alternative values it could take instead.
#[derive(Debug, Clone, Deserialize)]
pub struct Assumptions {
    #[serde(deserialize_with = "lenient_u32")]
    pub count: u32,
    #[serde(rename = "assumption", default, deserialize_with = "single_or_vec")]
    pub assumptions: Vec<Assumption>,
}

impl Assumptions {
    pub fn is_consistent(&self) -> bool {
        self.count as usize == self.assumptions.len()
            && self.assumptions.iter().all(Assumption::is_consistent)
    }
}

/// A single assumption, typically about the meaning of a word or phrase, and
/// the possible other values it could take.
#[derive(Debug, Clone, Deserialize)]
pub struct Assumption {
    /// Classification of the assumption, defining how it functions
    #[serde(rename = "type")]
    pub assumption_type: AssumptionType,
    /// The central word/phrase the assumption applies to. Absent for types
    /// that have no single associated word (MultiClash, ListOrTimes,
    /// CoordinateSystem, I, ...).
    #[serde(default)]
    pub word: Option<String>,
    /// A statement outlining the way the assumption will be applied
    #[serde(default)]
    pub template: Option<String>,
    /// Number of possible values available from this assumption
    #[serde(deserialize_with = "lenient_u32")]
    pub count: u32,
    /// The first-listed value is always the one in effect for the current
    /// query
    #[serde(rename = "value", default, deserialize_with = "single_or_vec")]
    pub values: Vec<AssumptionValue>,
}

impl Assumption {
    pub fn is_consistent(&self) -> bool {
        self.count as usize == self.values.len()
    }
}

/// Classification of an assumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum AssumptionType {
    /// A word can represent different categories of things, such as "pi"
    /// being a constant, a movie or a word
    Clash,
    /// A word is interpreted as a unit abbreviation but it is ambiguous which
    /// unit it represents, e.g. "m" for meters or minutes
    Unit,
    /// A number could be degrees or radians
    AngleUnit,
    /// A word refers to a mathematical function but it is ambiguous which,
    /// e.g. "log" as log base e or base 10
    Function,
    /// Multiple overlapping strings can have different interpretations
    MultiClash,
    /// Interpretations within the same overall category, e.g. kinds of
    /// hamburger
    SubCategory,
    /// Modifies an attribute of an already well-characterized entity
    Attribute,
    TimeAMOrPM,
    DateOrder,
    ListOrTimes,
    ListOrNumber,
    CoordinateSystem,
    /// "i" as the imaginary unit or a plain variable
    I,
    NumberBase,
    MixedFraction,
    MortalityYearDOB,
    TideStation,
    FormulaSelect,
    FormulaSolve,
    FormulaVariable,
    FormulaVariableOption,
    FormulaVariableInclude,
}

/// One possible value of an assumption: `name` is a unique internal
/// identifier, `description` is display text, and `input` is the token to
/// replay through the `assumption` request parameter to apply it.
#[derive(Debug, Clone, Deserialize)]
pub struct AssumptionValue {
    pub name: String,
    #[serde(rename = "desc", default)]
    pub description: String,
    pub input: String,
}
