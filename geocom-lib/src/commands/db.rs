use super::{CommandSpec, Instrument, Op};
use crate::protocol::{ArgKind, GetMode};

use ArgKind::{Bool, Byte, Enum, Float, Int, Str, Unsigned};
use Instrument::{Dna, Tps1000, Tps1100, Tps1200p, VivaTps};

const TPS: &[Instrument] = &[Tps1000, Tps1100, Tps1200p, VivaTps];
const TPS1100_UP: &[Instrument] = &[Tps1100, Tps1200p, VivaTps];
const TPS1100_1200: &[Instrument] = &[Tps1100, Tps1200p];
const TPS1000_1100: &[Instrument] = &[Tps1000, Tps1100];
const DNA: &[Instrument] = &[Dna];

const fn rpc(
    name: &'static str,
    instruments: &'static [Instrument],
    rpc: u16,
    args: &'static [ArgKind],
    returns: usize,
) -> CommandSpec {
    CommandSpec::new(name, instruments, Op::Rpc(rpc), args, returns)
}

const fn setting(name: &'static str, param: u16, args: &'static [ArgKind]) -> CommandSpec {
    CommandSpec::new(name, DNA, Op::Setting(param), args, 0)
}

const fn get(name: &'static str, mode: GetMode, index: u16) -> CommandSpec {
    CommandSpec::new(name, DNA, Op::Get(mode, index), &[], 1)
}

#[rustfmt::skip]
pub static COMMANDS: &[CommandSpec] = &[
    // COM
    rpc("COM_NullProc",              TPS,          0,     &[], 0),
    rpc("COM_SetDoublePrecision",    TPS,          107,   &[Unsigned], 0),
    rpc("COM_GetDoublePrecision",    TPS,          108,   &[], 1),
    rpc("COM_GetSWVersion",          TPS,          110,   &[], 3),
    rpc("COM_SwitchOnTPS",           TPS,          111,   &[Enum], 0),
    rpc("COM_SwitchOffTPS",          TPS,          112,   &[Enum], 0),
    rpc("COM_GetBinaryAvailable",    TPS,          113,   &[], 1),
    // CSV
    rpc("CSV_GetInstrumentNo",       TPS,          5003,  &[], 1),
    rpc("CSV_GetInstrumentName",     TPS,          5004,  &[], 1),
    rpc("CSV_SetUserInstrumentName", TPS1000_1100, 5005,  &[Str], 0),
    rpc("CSV_GetUserInstrumentName", TPS1000_1100, 5006,  &[], 1),
    rpc("CSV_SetDateTime",           TPS,          5007,  &[Int, Byte, Byte, Byte, Byte, Byte], 0),
    rpc("CSV_GetDateTime",           TPS,          5008,  &[], 6),
    rpc("CSV_GetIntTemp",            TPS,          5011,  &[], 1),
    rpc("CSV_GetSWVersion",          TPS,          5034,  &[], 3),
    rpc("CSV_GetDeviceConfig",       TPS,          5035,  &[], 2),
    rpc("CSV_CheckPower",            TPS1100_1200, 5039,  &[], 3),
    // EDM
    rpc("EDM_Laserpointer",          TPS,          1004,  &[Enum], 0),
    // TMC
    rpc("TMC_DoMeasure",             TPS,          2008,  &[Enum, Enum], 0),
    rpc("TMC_GetStation",            TPS,          2009,  &[], 4),
    rpc("TMC_SetStation",            TPS,          2010,  &[Float, Float, Float, Float], 0),
    rpc("TMC_GetHeight",             TPS,          2011,  &[], 1),
    rpc("TMC_SetHeight",             TPS,          2012,  &[Float], 0),
    rpc("TMC_SetHandDist",           TPS,          2019,  &[Float, Float, Enum], 0),
    rpc("TMC_GetFace",               TPS,          2026,  &[], 1),
    rpc("TMC_GetAngle5",             TPS,          2107,  &[Enum], 2),
    rpc("TMC_GetSimpleMea",          TPS,          2108,  &[Unsigned, Enum], 3),
    rpc("TMC_SetOrientation",        TPS,          2113,  &[Float], 0),
    rpc("TMC_QuickDist",             TPS,          2117,  &[], 3),
    // MOT
    rpc("MOT_StartController",       TPS,          6001,  &[Enum], 0),
    rpc("MOT_StopController",        TPS,          6002,  &[Enum], 0),
    rpc("MOT_SetVelocity",           TPS,          6004,  &[Float, Float], 0),
    // AUT
    rpc("AUT_LockIn",                TPS,          9013,  &[], 0),
    rpc("AUT_MakePositioning",       TPS,          9027,  &[Float, Float, Enum, Enum, Bool], 0),
    rpc("AUT_ChangeFace",            TPS,          9028,  &[Enum, Enum, Bool], 0),
    rpc("AUT_Search",                TPS,          9029,  &[Float, Float, Bool], 0),
    rpc("AUT_FineAdjust",            TPS,          9037,  &[Float, Float, Bool], 0),
    // BMM
    rpc("BMM_BeepNormal",            TPS,          11003, &[], 0),
    rpc("BMM_BeepAlarm",             TPS,          11004, &[], 0),
    // SUP
    rpc("SUP_GetConfig",             TPS,          14001, &[], 3),
    rpc("SUP_SetConfig",             TPS,          14002, &[Bool, Enum, Unsigned], 0),
    // BAP
    rpc("BAP_MeasDistanceAngle",     TPS,          17017, &[Enum], 4),
    // IOS
    rpc("IOS_BeepOff",               TPS1100_UP,   20000, &[], 0),
    rpc("IOS_BeepOn",                TPS1100_UP,   20001, &[Unsigned], 0),

    // DNA settings
    setting("DNA_Beep",                30,  &[Unsigned]),
    setting("DNA_Illumination",        31,  &[Unsigned]),
    setting("DNA_Contrast",            32,  &[Unsigned]),
    setting("DNA_DistanceUnit",        41,  &[Unsigned]),
    setting("DNA_TemperatureUnit",     42,  &[Unsigned]),
    setting("DNA_Decimals",            51,  &[Unsigned]),
    setting("DNA_Baud",                70,  &[Unsigned]),
    setting("DNA_Parity",              71,  &[Unsigned]),
    setting("DNA_Terminator",          73,  &[Unsigned]),
    setting("DNA_Protocol",            75,  &[Bool]),
    setting("DNA_Recorder",            76,  &[Unsigned]),
    setting("DNA_Delay",               78,  &[Unsigned]),
    setting("DNA_Battery",             90,  &[]),
    setting("DNA_Temperature",         91,  &[]),
    setting("DNA_AutoOff",             95,  &[Unsigned]),
    setting("DNA_DisplayHeater",       106, &[Bool]),
    setting("DNA_CurvatureCorrection", 125, &[Bool]),
    setting("DNA_StaffMode",           127, &[Bool]),
    setting("DNA_Format",              137, &[Unsigned]),
    setting("DNA_CodeRecording",       138, &[Unsigned]),
    // DNA words
    get("DNA_GetPointId",            GetMode::Measure, 11),
    get("DNA_GetNote",               GetMode::Measure, 71),
    get("DNA_GetTime",               GetMode::Instant, 560),
    get("DNA_GetDate",               GetMode::Instant, 561),
    get("DNA_GetYear",               GetMode::Instant, 562),
    get("DNA_MeasureDistance",       GetMode::Measure, 32),
    get("DNA_MeasureReading",        GetMode::Measure, 330),
    get("DNA_MeasureTemperature",    GetMode::Measure, 95),
    get("DNA_GetSerialNumber",       GetMode::Instant, 12),
    get("DNA_GetInstrumentType",     GetMode::Instant, 13),
    get("DNA_GetFullDate",           GetMode::Instant, 17),
    get("DNA_GetDayTime",            GetMode::Instant, 19),
    get("DNA_GetSoftwareVersion",    GetMode::Instant, 599),
    CommandSpec::new("DNA_SetPointId", DNA, Op::Put(11), &[Str], 0),
    CommandSpec::new("DNA_SetNote",    DNA, Op::Put(71), &[Str], 0),
    // DNA immediate commands
    CommandSpec::new("DNA_BeepShort",  DNA, Op::Raw("BEEP/0"), &[], 0),
    CommandSpec::new("DNA_BeepLong",   DNA, Op::Raw("BEEP/1"), &[], 0),
    CommandSpec::new("DNA_BeepAlarm",  DNA, Op::Raw("BEEP/2"), &[], 0),
    CommandSpec::new("DNA_WakeUp",     DNA, Op::Raw("a"), &[], 0),
    CommandSpec::new("DNA_Shutdown",   DNA, Op::Raw("b"), &[], 0),
    CommandSpec::new("DNA_Clear",      DNA, Op::Raw("c"), &[], 0),
];
