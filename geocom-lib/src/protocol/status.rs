//! Return code tables.

use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusEntry {
    pub code: u32,
    pub name: &'static str,
    pub description: &'static str,
}

impl StatusEntry {
    const fn new(code: u32, name: &'static str, description: &'static str) -> Self {
        StatusEntry {
            code,
            name,
            description,
        }
    }
}

/// Transport or RPC status of a GeoCom reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Known(&'static StatusEntry),
    Unknown(u32),
}

impl StatusCode {
    pub const OK: u32 = 0;

    pub fn from_code(code: u32) -> Self {
        match lookup(code) {
            Some(entry) => StatusCode::Known(entry),
            None => StatusCode::Unknown(code),
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            StatusCode::Known(entry) => entry.code,
            StatusCode::Unknown(code) => *code,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code() == Self::OK
    }

    pub fn is_known(&self) -> bool {
        matches!(self, StatusCode::Known(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            StatusCode::Known(entry) => entry.name,
            StatusCode::Unknown(_) => "UNKNOWN",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StatusCode::Known(entry) => entry.description,
            StatusCode::Unknown(_) => "Unknown return code",
        }
    }
}

impl Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

pub fn lookup(code: u32) -> Option<&'static StatusEntry> {
    lazy_static! {
        static ref INDEX: HashMap<u32, &'static StatusEntry> =
            STATUS.iter().map(|entry| (entry.code, entry)).collect();
    }
    INDEX.get(&code).copied()
}

pub fn find(name: &str) -> Option<&'static StatusEntry> {
    STATUS.iter().find(|entry| entry.name == name)
}

/// Error token of a GSI Online reply, `@W<n>` or `@E<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GsiError {
    pub warning: bool,
    pub code: u32,
}

impl GsiError {
    pub fn description(&self) -> &'static str {
        match (self.warning, self.code) {
            (true, 400) => "Instrument busy",
            (true, 427) => "Invalid command",
            (false, 0) => "Unknown error",
            (false, 439) => "Measurement not possible",
            (false, 458) => "Instrument tilted out of range",
            _ => "Unlisted instrument error",
        }
    }
}

impl Display for GsiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "@{}{}: {}",
            if self.warning { 'W' } else { 'E' },
            self.code,
            self.description()
        )
    }
}

static STATUS: &[StatusEntry] = &[
    StatusEntry::new(0, "OK", "Function successfully completed"),
    StatusEntry::new(1, "UNDEFINED", "Unknown error, result unspecified"),
    StatusEntry::new(2, "IVPARAM", "Invalid parameter detected. Result unspecified"),
    StatusEntry::new(3, "IVRESULT", "Invalid result"),
    StatusEntry::new(4, "FATAL", "Fatal error"),
    StatusEntry::new(5, "NOT_IMPL", "Not implemented yet"),
    StatusEntry::new(6, "TIME_OUT", "Function execution timed out. Result unspecified"),
    StatusEntry::new(7, "SET_INCOMPL", "Parameter setup for subsystem is incomplete"),
    StatusEntry::new(8, "ABORT", "Function execution has been aborted"),
    StatusEntry::new(9, "NOMEMORY", "Fatal error - not enough memory"),
    StatusEntry::new(10, "NOTINIT", "Fatal error - subsystem not initialized"),
    StatusEntry::new(12, "SHUT_DOWN", "Subsystem is down"),
    StatusEntry::new(13, "SYSBUSY", "System busy/already in use of another process. Cannot execute"),
    StatusEntry::new(14, "HWFAILURE", "Fatal error - hardware failure"),
    StatusEntry::new(15, "ABORT_APPL", "Execution of application has been aborted (SHIFT-ESC)"),
    StatusEntry::new(16, "LOW_POWER", "Operation aborted - insufficient power supply level"),
    StatusEntry::new(17, "IVVERSION", "Invalid version of file, .."),
    StatusEntry::new(18, "BATT_EMPTY", "Battery empty"),
    StatusEntry::new(20, "NO_EVENT", "no event pending"),
    StatusEntry::new(21, "OUT_OF_TEMP", "out of temperature range"),
    StatusEntry::new(22, "INSTRUMENT_TILT", "instrument tilting out of range"),
    StatusEntry::new(23, "COM_SETTING", "communication error"),
    StatusEntry::new(24, "NO_ACTION", "TYPE Input 'do no action'"),
    StatusEntry::new(25, "SLEEP_MODE", "Instr. run into the sleep mode"),
    StatusEntry::new(257, "ANG_ERROR", "Angles and Inclinations not valid"),
    StatusEntry::new(258, "ANG_INCL_ERROR", "inclinations not valid"),
    StatusEntry::new(259, "ANG_BAD_ACC", "value accuracy not reached"),
    StatusEntry::new(260, "ANG_BAD_ANGLE_ACC", "angle-accuracy not reached"),
    StatusEntry::new(261, "ANG_BAD_INCLIN_ACC", "inclination accuracy not reached"),
    StatusEntry::new(266, "ANG_WRITE_PROTECTED", "no write access allowed"),
    StatusEntry::new(267, "ANG_OUT_OF_RANGE", "value out of range"),
    StatusEntry::new(268, "ANG_IR_OCCURED", "function aborted due to interrupt"),
    StatusEntry::new(269, "ANG_HZ_MOVED", "hz moved during incline measurement"),
    StatusEntry::new(270, "ANG_OS_ERROR", "troubles with operation system"),
    StatusEntry::new(271, "ANG_DATA_ERROR", "overflow at parameter values"),
    StatusEntry::new(272, "ANG_PEAK_CNT_UFL", "too less peaks"),
    StatusEntry::new(273, "ANG_TIME_OUT", "reading timeout"),
    StatusEntry::new(274, "ANG_TOO_MANY_EXPOS", "too many exposures wanted"),
    StatusEntry::new(275, "ANG_PIX_CTRL_ERR", "picture height out of range"),
    StatusEntry::new(276, "ANG_MAX_POS_SKIP", "positive exposure dynamic overflow"),
    StatusEntry::new(277, "ANG_MAX_NEG_SKIP", "negative exposure dynamic overflow"),
    StatusEntry::new(278, "ANG_EXP_LIMIT", "exposure time overflow"),
    StatusEntry::new(279, "ANG_UNDER_EXPOSURE", "picture under-exposured"),
    StatusEntry::new(280, "ANG_OVER_EXPOSURE", "picture over-exposured"),
    StatusEntry::new(300, "ANG_TMANY_PEAKS", "too many peaks detected"),
    StatusEntry::new(301, "ANG_TLESS_PEAKS", "too less peaks detected"),
    StatusEntry::new(302, "ANG_PEAK_TOO_SLIM", "peak too slim"),
    StatusEntry::new(303, "ANG_PEAK_TOO_WIDE", "peak to wide"),
    StatusEntry::new(304, "ANG_BAD_PEAKDIFF", "bad peak difference"),
    StatusEntry::new(305, "ANG_UNDER_EXP_PICT", "too less peak amplitude"),
    StatusEntry::new(306, "ANG_PEAKS_INHOMOGEN", "in-homogenous peak amplitudes"),
    StatusEntry::new(307, "ANG_NO_DECOD_POSS", "no peak decoding possible"),
    StatusEntry::new(308, "ANG_UNSTABLE_DECOD", "peak decoding not stable"),
    StatusEntry::new(309, "ANG_TLESS_FPEAKS", "too less valid fine-peaks"),
    StatusEntry::new(512, "ATA_NOT_READY", "ATR-System is not ready"),
    StatusEntry::new(513, "ATA_NO_RESULT", "Result isn't available yet"),
    StatusEntry::new(514, "ATA_SEVERAL_TARGETS", "Several Targets detected"),
    StatusEntry::new(515, "ATA_BIG_SPOT", "Spot is too big for analyze"),
    StatusEntry::new(516, "ATA_BACKGROUND", "Background is too bright"),
    StatusEntry::new(517, "ATA_NO_TARGETS", "No targets detected"),
    StatusEntry::new(518, "ATA_NOT_ACCURAT", "Accuracy worse than asked for"),
    StatusEntry::new(519, "ATA_SPOT_ON_EDGE", "Spot is on the edge of the sensing area"),
    StatusEntry::new(522, "ATA_BLOOMING", "Blooming or spot on edge detected"),
    StatusEntry::new(523, "ATA_NOT_BUSY", "ATR isn't in a continuous mode"),
    StatusEntry::new(524, "ATA_STRANGE_LIGHT", "Not the spot of the own target illuminator"),
    StatusEntry::new(525, "ATA_V24_FAIL", "Communication error to sensor (ATR)"),
    StatusEntry::new(527, "ATA_HZ_FAIL", "No Spot detected in Hz-direction"),
    StatusEntry::new(528, "ATA_V_FAIL", "No Spot detected in V-direction"),
    StatusEntry::new(529, "ATA_HZ_STRANGE_L", "Strange light in Hz-direction"),
    StatusEntry::new(530, "ATA_V_STRANGE_L", "Strange light in V-direction"),
    StatusEntry::new(531, "ATA_SLDR_TRANSFER_PENDING", "On multiple ATA_SLDR_OpenTransfer"),
    StatusEntry::new(532, "ATA_SLDR_TRANSFER_ILLEGAL", "No ATA_SLDR_OpenTransfer happened"),
    StatusEntry::new(533, "ATA_SLDR_DATA_ERROR", "Unexpected data format received"),
    StatusEntry::new(534, "ATA_SLDR_CHK_SUM_ERROR", "Checksum error in transmitted data"),
    StatusEntry::new(535, "ATA_SLDR_ADDRESS_ERROR", "Address out of valid range"),
    StatusEntry::new(536, "ATA_SLDR_INV_LOADFILE", "Firmware file has invalid format"),
    StatusEntry::new(537, "ATA_SLDR_UNSUPPORTED", "Current (loaded) Firmware doesn't support upload"),
    StatusEntry::new(769, "EDM_SYSTEM_ERR", "Fatal EDM sensor error. See for the exact reason the original EDM sensor"),
    StatusEntry::new(770, "EDM_INVALID_COMMAND", "Invalid command or unknown command, see command syntax"),
    StatusEntry::new(771, "EDM_BOOM_ERR", "Boomerang error"),
    StatusEntry::new(772, "EDM_SIGN_LOW_ERR", "Received signal to low, prism to far away, or natural barrier, bad"),
    StatusEntry::new(773, "EDM_DIL_ERR", "DIL distance measurement out of limit"),
    StatusEntry::new(774, "EDM_SIGN_HIGH_ERR", "Received signal to strong, prism to near, stranger light effect"),
    StatusEntry::new(778, "EDM_DEV_NOT_INSTALLED", "Device like EGL, DL is not installed"),
    StatusEntry::new(779, "EDM_NOT_FOUND", "Search result invalid. For the exact explanation see in the description"),
    StatusEntry::new(780, "EDM_ERROR_RECEIVED", "Communication ok, but an error reported from the EDM sensor"),
    StatusEntry::new(781, "EDM_MISSING_SRVPWD", "No service password is set"),
    StatusEntry::new(782, "EDM_INVALID_ANSWER", "Communication ok, but an unexpected answer received"),
    StatusEntry::new(783, "EDM_SEND_ERR", "Data send error, sending buffer is full"),
    StatusEntry::new(784, "EDM_RECEIVE_ERR", "Data receive error, like parity buffer overflow"),
    StatusEntry::new(785, "EDM_INTERNAL_ERR", "Internal EDM subsystem error"),
    StatusEntry::new(786, "EDM_BUSY", "Sensor is working already, abort current measuring first"),
    StatusEntry::new(787, "EDM_NO_MEASACTIVITY", "No measurement activity started"),
    StatusEntry::new(788, "EDM_CHKSUM_ERR", "Calculated checksum, resp. received data wrong (only in binary"),
    StatusEntry::new(789, "EDM_INIT_OR_STOP_ERR", "During start up or shut down phase an error occured. It is saved in the"),
    StatusEntry::new(790, "EDM_SRL_NOT_AVAILABLE", "Red laser not available on this sensor HW"),
    StatusEntry::new(791, "EDM_MEAS_ABORTED", "Measurement will be aborted (will be used for the lasersecurity)"),
    StatusEntry::new(798, "EDM_SLDR_TRANSFER_PENDING", "Multiple OpenTransfer calls"),
    StatusEntry::new(799, "EDM_SLDR_TRANSFER_ILLEGAL", "No opentransfer happened"),
    StatusEntry::new(800, "EDM_SLDR_DATA_ERROR", "Unexpected data format received"),
    StatusEntry::new(801, "EDM_SLDR_CHK_SUM_ERROR", "Checksum error in transmitted data"),
    StatusEntry::new(802, "EDM_SLDR_ADDR_ERROR", "Address out of valid range"),
    StatusEntry::new(803, "EDM_SLDR_INV_LOADFILE", "Firmware file has invalid format"),
    StatusEntry::new(804, "EDM_SLDR_UNSUPPORTED", "Current (loaded) firmware doesn't support upload"),
    StatusEntry::new(808, "EDM_UNKNOW_ERR", "Undocumented error from the EDM sensor, should not occur"),
    StatusEntry::new(1025, "GM_WRONG_AREA_DEF", "Wrong Area Definition"),
    StatusEntry::new(1026, "GM_IDENTICAL_PTS", "Identical Points"),
    StatusEntry::new(1027, "GM_PTS_IN_LINE", "Points on one line"),
    StatusEntry::new(1028, "GM_OUT_OF_RANGE", "Out of range"),
    StatusEntry::new(1029, "GM_PLAUSIBILITY_ERR", "Plausibility error"),
    StatusEntry::new(1030, "GM_TOO_FEW_OBSERVATIONS", "To few Observations to calculate the average"),
    StatusEntry::new(1031, "GM_NO_SOLUTION", "No Solution"),
    StatusEntry::new(1032, "GM_ONE_SOLUTION", "Only one solution"),
    StatusEntry::new(1033, "GM_TWO_SOLUTIONS", "Second solution"),
    StatusEntry::new(1034, "GM_ANGLE_SMALLER_15GON", "Warning Intersection angle < 15gon"),
    StatusEntry::new(1035, "GM_INVALID_TRIANGLE_TYPE", "Invalid triangle"),
    StatusEntry::new(1036, "GM_INVALID_ANGLE_SYSTEM", "Invalid angle unit"),
    StatusEntry::new(1037, "GM_INVALID_DIST_SYSTEM", "Invalid distance unit"),
    StatusEntry::new(1038, "GM_INVALID_V_SYSTEM", "Invalid vertical angle"),
    StatusEntry::new(1039, "GM_INVALID_TEMP_SYSTEM", "Invalid temperature system"),
    StatusEntry::new(1040, "GM_INVALID_PRES_SYSTEM", "Invalid pressure unit"),
    StatusEntry::new(1041, "GM_RADIUS_NOT_POSSIBLE", "Invalid radius"),
    StatusEntry::new(1042, "GM_NO_PROVISIONAL_VALUES", "GM2 insufficient data"),
    StatusEntry::new(1043, "GM_SINGULAR_MATRIX", "GM2 bad data"),
    StatusEntry::new(1044, "GM_TOO_MANY_ITERATIONS", "GM2 bad data distr"),
    StatusEntry::new(1045, "GM_IDENTICAL_TIE_POINTS", "GM2 same tie points"),
    StatusEntry::new(1046, "GM_SETUP_EQUALS_TIE_POINT", "GM2 sta/tie point same"),
    StatusEntry::new(1283, "TMC_NO_FULL_CORRECTION", "Warning measurement without full correction"),
    StatusEntry::new(1284, "TMC_ACCURACY_GUARANTEE", "Info accuracy can not be guarantee"),
    StatusEntry::new(1285, "TMC_ANGLE_OK", "Warning only angle measurement valid"),
    StatusEntry::new(1288, "TMC_ANGLE_NO_FULL_CORRECTION", "Warning only angle measurement valid but without full correction"),
    StatusEntry::new(1289, "TMC_ANGLE_ACCURACY_GUARANTEE", "Info only angle measurement valid but accuracy can not be guarantee"),
    StatusEntry::new(1290, "TMC_ANGLE_ERROR", "Error no angle measurement"),
    StatusEntry::new(1291, "TMC_DIST_PPM", "Error wrong setting of PPM or MM on EDM"),
    StatusEntry::new(1292, "TMC_DIST_ERROR", "Error distance measurement not done (no aim, etc.)"),
    StatusEntry::new(1293, "TMC_BUSY", "Error system is busy (no measurement done)"),
    StatusEntry::new(1294, "TMC_SIGNAL_ERROR", "Error no signal on EDM (only in signal mode)"),
    StatusEntry::new(1536, "MEM_OUT_OF_MEMORY", "out of memory"),
    StatusEntry::new(1537, "MEM_OUT_OF_HANDLES", "out of memory handles"),
    StatusEntry::new(1538, "MEM_TAB_OVERFLOW", "memory table overflow"),
    StatusEntry::new(1539, "MEM_HANDLE_INVALID", "used handle is invalid"),
    StatusEntry::new(1540, "MEM_DATA_NOT_FOUND", "memory data not found"),
    StatusEntry::new(1541, "MEM_DELETE_ERROR", "memory delete error"),
    StatusEntry::new(1542, "MEM_ZERO_ALLOC_ERR", "tried to allocate 0 bytes"),
    StatusEntry::new(1543, "MEM_REORG_ERR", "can't reorganize memory"),
    StatusEntry::new(1792, "MOT_UNREADY", "Motorization not ready"),
    StatusEntry::new(1793, "MOT_BUSY", "Motorization is handling another task"),
    StatusEntry::new(1794, "MOT_NOT_OCONST", "Not in velocity mode"),
    StatusEntry::new(1795, "MOT_NOT_CONFIG", "Motorization is in the wrong mode or busy"),
    StatusEntry::new(1796, "MOT_NOT_POSIT", "Not in posit mode"),
    StatusEntry::new(1797, "MOT_NOT_SERVICE", "Not in service mode"),
    StatusEntry::new(1798, "MOT_NOT_BUSY", "Motorization is handling no task"),
    StatusEntry::new(1799, "MOT_NOT_LOCK", "Not in tracking mode"),
    StatusEntry::new(1800, "MOT_NOT_SPIRAL", "Not in spiral mode"),
    StatusEntry::new(2048, "LDR_PENDING", "Transfer is already open"),
    StatusEntry::new(2049, "LDR_PRGM_OCC", "Maximal number of applications reached"),
    StatusEntry::new(2050, "LDR_TRANSFER_ILLEGAL", "No Transfer is open"),
    StatusEntry::new(2051, "LDR_NOT_FOUND", "Function or program not found"),
    StatusEntry::new(2052, "LDR_ALREADY_EXIST", "Loadable object already exists"),
    StatusEntry::new(2053, "LDR_NOT_EXIST", "Can't delete. Object does not exist"),
    StatusEntry::new(2054, "LDR_SIZE_ERROR", "Error in loading object"),
    StatusEntry::new(2055, "LDR_MEM_ERROR", "Error at memory allocation/release"),
    StatusEntry::new(2056, "LDR_PRGM_NOT_EXIST", "Can't load text-object because application does not exist"),
    StatusEntry::new(2057, "LDR_FUNC_LEVEL_ERR", "Call-stack limit reached"),
    StatusEntry::new(2058, "LDR_RECURSIV_ERR", "Recursive calling of an loaded function"),
    StatusEntry::new(2059, "LDR_INST_ERR", "Error in installation function"),
    StatusEntry::new(2060, "LDR_FUNC_OCC", "Maximal number of functions reached"),
    StatusEntry::new(2061, "LDR_RUN_ERROR", "Error during a loaded application program"),
    StatusEntry::new(2062, "LDR_DEL_MENU_ERR", "Error during deleting of menu entries of an application"),
    StatusEntry::new(2063, "LDR_OBJ_TYPE_ERROR", "Loadable object is unknown"),
    StatusEntry::new(2064, "LDR_WRONG_SECKEY", "Wrong security key"),
    StatusEntry::new(2065, "LDR_ILLEGAL_LOADADR", "Illegal application memory address"),
    StatusEntry::new(2066, "LDR_IEEE_ERROR", "Loadable object file is not IEEE format"),
    StatusEntry::new(2067, "LDR_WRONG_APPL_VERSION", "Bad application version number"),
    StatusEntry::new(2305, "BMM_XFER_PENDING", "Loading process already opened"),
    StatusEntry::new(2306, "BMM_NO_XFER_OPEN", "Transfer not opened"),
    StatusEntry::new(2307, "BMM_UNKNOWN_CHARSET", "Unknown character set"),
    StatusEntry::new(2308, "BMM_NOT_INSTALLED", "Display module not present"),
    StatusEntry::new(2309, "BMM_ALREADY_EXIST", "Character set already exists"),
    StatusEntry::new(2310, "BMM_CANT_DELETE", "Character set cannot be deleted"),
    StatusEntry::new(2311, "BMM_MEM_ERROR", "Memory cannot be allocated"),
    StatusEntry::new(2312, "BMM_CHARSET_USED", "Character set still used"),
    StatusEntry::new(2313, "BMM_CHARSET_SAVED", "Char-set cannot be deleted or is protected"),
    StatusEntry::new(2314, "BMM_INVALID_ADR", "Attempt to copy a character block outside the allocated memory"),
    StatusEntry::new(2315, "BMM_CANCELANDADR_ERROR", "Error during release of allocated memory"),
    StatusEntry::new(2316, "BMM_INVALID_SIZE", "Number of bytes specified in header does not match the bytes read"),
    StatusEntry::new(2317, "BMM_CANCELANDINVSIZE_ERROR", "Allocated memory could not be released"),
    StatusEntry::new(2318, "BMM_ALL_GROUP_OCC", "Max. number of character sets already loaded"),
    StatusEntry::new(2319, "BMM_CANT_DEL_LAYERS", "Layer cannot be deleted"),
    StatusEntry::new(2320, "BMM_UNKNOWN_LAYER", "Required layer does not exist"),
    StatusEntry::new(2321, "BMM_INVALID_LAYERLEN", "Layer length exceeds maximum"),
    StatusEntry::new(2560, "TXT_OTHER_LANG", "text found, but in an other language"),
    StatusEntry::new(2561, "TXT_UNDEF_TOKEN", "text not found, token is undefined"),
    StatusEntry::new(2562, "TXT_UNDEF_LANG", "language is not defined"),
    StatusEntry::new(2563, "TXT_TOOMANY_LANG", "maximal number of languages reached"),
    StatusEntry::new(2564, "TXT_GROUP_OCC", "desired text group is already in use"),
    StatusEntry::new(2565, "TXT_INVALID_GROUP", "text group is invalid"),
    StatusEntry::new(2566, "TXT_OUT_OF_MEM", "out of text memory"),
    StatusEntry::new(2567, "TXT_MEM_ERROR", "memory write / allocate error"),
    StatusEntry::new(2568, "TXT_TRANSFER_PENDING", "text transfer is already open"),
    StatusEntry::new(2569, "TXT_TRANSFER_ILLEGAL", "text transfer is not opened"),
    StatusEntry::new(2570, "TXT_INVALID_SIZE", "illegal text data size"),
    StatusEntry::new(2571, "TXT_ALREADY_EXIST", "language already exists"),
    StatusEntry::new(2817, "MMI_BUTTON_ID_EXISTS", "Button ID already exists"),
    StatusEntry::new(2818, "MMI_DLG_NOT_OPEN", "Dialog not open"),
    StatusEntry::new(2819, "MMI_DLG_OPEN", "Dialog already open"),
    StatusEntry::new(2820, "MMI_DLG_SPEC_MISMATCH", "Number of fields specified with OpenDialogDef does not match"),
    StatusEntry::new(2821, "MMI_DLGDEF_EMPTY", "Empty dialog definition"),
    StatusEntry::new(2822, "MMI_DLGDEF_NOT_OPEN", "Dialog definition not open"),
    StatusEntry::new(2823, "MMI_DLGDEF_OPEN", "Dialog definition still open"),
    StatusEntry::new(2824, "MMI_FIELD_ID_EXISTS", "Field ID already exists"),
    StatusEntry::new(2825, "MMI_ILLEGAL_APP_ID", "Illegal application ID"),
    StatusEntry::new(2826, "MMI_ILLEGAL_BUTTON_ID", "Illegal button ID"),
    StatusEntry::new(2827, "MMI_ILLEGAL_DLG_ID", "Illegal dialog ID"),
    StatusEntry::new(2828, "MMI_ILLEGAL_FIELD_COORDS", "Illegal field coordinates or length/height"),
    StatusEntry::new(2829, "MMI_ILLEGAL_FIELD_ID", "Illegal field ID"),
    StatusEntry::new(2830, "MMI_ILLEGAL_FIELD_TYPE", "Illegal field type"),
    StatusEntry::new(2831, "MMI_ILLEGAL_FIELD_FORMAT", "Illegal field format"),
    StatusEntry::new(2832, "MMI_ILLEGAL_FIXLINES", "Illegal number of fix dialog lines"),
    StatusEntry::new(2833, "MMI_ILLEGAL_MB_TYPE", "Illegal message box type"),
    StatusEntry::new(2834, "MMI_ILLEGAL_MENU_ID", "Illegal menu ID"),
    StatusEntry::new(2835, "MMI_ILLEGAL_MENUITEM_ID", "Illegal menu item ID"),
    StatusEntry::new(2836, "MMI_ILLEGAL_NEXT_ID", "Illegal next field ID"),
    StatusEntry::new(2837, "MMI_ILLEGAL_TOPLINE", "Illegal topline number"),
    StatusEntry::new(2838, "MMI_NOMORE_BUTTONS", "No more buttons per dialog/menu available"),
    StatusEntry::new(2839, "MMI_NOMORE_DLGS", "No more dialogs available"),
    StatusEntry::new(2840, "MMI_NOMORE_FIELDS", "No more fields per dialog available"),
    StatusEntry::new(2841, "MMI_NOMORE_MENUS", "No more menus available"),
    StatusEntry::new(2842, "MMI_NOMORE_MENUITEMS", "No more menu items available"),
    StatusEntry::new(2843, "MMI_NOMORE_WINDOWS", "No more windows available"),
    StatusEntry::new(2844, "MMI_SYS_BUTTON", "The button belongs to the MMI"),
    StatusEntry::new(2845, "MMI_VREF_UNDEF", "The parameter list for OpenDialog is uninitialized"),
    StatusEntry::new(2846, "MMI_EXIT_DLG", "The MMI should exit the dialog"),
    StatusEntry::new(2847, "MMI_KEEP_FOCUS", "The MMI should keep focus within field being edited"),
    StatusEntry::new(2848, "MMI_NOMORE_ITEMS", "Notification to the MMI that no more items available"),
    StatusEntry::new(3072, "COM_ERO", "Initiate Extended Runtime Operation (ERO)"),
    StatusEntry::new(3073, "COM_CANT_ENCODE", "Cannot encode arguments in client"),
    StatusEntry::new(3074, "COM_CANT_DECODE", "Cannot decode results in client"),
    StatusEntry::new(3075, "COM_CANT_SEND", "Hardware error while sending"),
    StatusEntry::new(3076, "COM_CANT_RECV", "Hardware error while receiving"),
    StatusEntry::new(3077, "COM_TIMEDOUT", "Request timed out"),
    StatusEntry::new(3078, "COM_WRONG_FORMAT", "Packet format error"),
    StatusEntry::new(3079, "COM_VER_MISMATCH", "Version mismatch between client and server"),
    StatusEntry::new(3080, "COM_CANT_DECODE_REQ", "Cannot decode arguments in server"),
    StatusEntry::new(3081, "COM_PROC_UNAVAIL", "Unknown RPC, procedure ID invalid"),
    StatusEntry::new(3082, "COM_CANT_ENCODE_REP", "Cannot encode results in server"),
    StatusEntry::new(3083, "COM_SYSTEM_ERR", "Unspecified generic system error"),
    StatusEntry::new(3085, "COM_FAILED", "Unspecified error"),
    StatusEntry::new(3086, "COM_NO_BINARY", "Binary protocol not available"),
    StatusEntry::new(3087, "COM_INTR", "Call interrupted"),
    StatusEntry::new(3090, "COM_REQUIRES_8DBITS", "Protocol needs 8bit encoded characters"),
    StatusEntry::new(3093, "COM_TR_ID_MISMATCH", "Transaction ID mismatch error"),
    StatusEntry::new(3094, "COM_NOT_GEOCOM", "Protocol not recognizable"),
    StatusEntry::new(3095, "COM_UNKNOWN_PORT", "(WIN) Invalid port address"),
    StatusEntry::new(3099, "COM_ERO_END", "ERO is terminating"),
    StatusEntry::new(3100, "COM_OVERRUN", "Internal error data buffer overflow"),
    StatusEntry::new(3101, "COM_SRVR_RX_CHECKSUM_ERROR", "Invalid checksum on server side received"),
    StatusEntry::new(3102, "COM_CLNT_RX_CHECKSUM_ERROR", "Invalid checksum on client side received"),
    StatusEntry::new(3103, "COM_PORT_NOT_AVAILABLE", "(WIN) Port not available"),
    StatusEntry::new(3104, "COM_PORT_NOT_OPEN", "(WIN) Port not opened"),
    StatusEntry::new(3105, "COM_NO_PARTNER", "(WIN) Unable to find TPS"),
    StatusEntry::new(3106, "COM_ERO_NOT_STARTED", "Extended Runtime Operation could not be started"),
    StatusEntry::new(3107, "COM_CONS_REQ", "Att to send cons reqs"),
    StatusEntry::new(3108, "COM_SRVR_IS_SLEEPING", "TPS has gone to sleep. Wait and try again"),
    StatusEntry::new(3109, "COM_SRVR_IS_OFF", "TPS has shut down. Wait and try again"),
    StatusEntry::new(3328, "DPL_NOCREATE", "no file creation, fatal"),
    StatusEntry::new(3329, "DPL_NOTOPEN", "bank not open"),
    StatusEntry::new(3330, "DPL_ALRDYOPEN", "a databank is already open"),
    StatusEntry::new(3331, "DPL_NOTFOUND", "databank file does not exist"),
    StatusEntry::new(3332, "DPL_EXISTS", "databank already exists"),
    StatusEntry::new(3333, "DPL_EMPTY", "databank is empty"),
    StatusEntry::new(3334, "DPL_BADATA", "bad data detected"),
    StatusEntry::new(3335, "DPL_BADFIELD", "bad field type"),
    StatusEntry::new(3336, "DPL_BADINDEX", "bad index information"),
    StatusEntry::new(3337, "DPL_BADKEY", "bad key type"),
    StatusEntry::new(3338, "DPL_BADMODE", "bad mode"),
    StatusEntry::new(3339, "DPL_BADRANGE", "bad range"),
    StatusEntry::new(3340, "DPL_DUPLICATE", "duplicate keys not allowed"),
    StatusEntry::new(3341, "DPL_INCOMPLETE", "record is incomplete"),
    StatusEntry::new(3342, "DPL_IVDBID", "invalid db project id"),
    StatusEntry::new(3343, "DPL_IVNAME", "invalid name"),
    StatusEntry::new(3344, "DPL_LOCKED", "data locked"),
    StatusEntry::new(3345, "DPL_NOTLOCKED", "data not locked"),
    StatusEntry::new(3346, "DPL_NODATA", "no data found"),
    StatusEntry::new(3347, "DPL_NOMATCH", "no matching key found"),
    StatusEntry::new(3348, "DPL_NOSPACE", "no more (disk) space left"),
    StatusEntry::new(3349, "DPL_NOCLOSE", "could not close db (sys. error)"),
    StatusEntry::new(3350, "DPL_RELATIONS", "record still has relations"),
    StatusEntry::new(3351, "DPL_NULLPTR", "null pointer"),
    StatusEntry::new(3352, "DPL_BADFORMAT", "bad databank format, wrong version"),
    StatusEntry::new(3353, "DPL_BADRECTYPE", "bad record type"),
    StatusEntry::new(3354, "DPL_OUTOFMEM", "no more (memory) space left"),
    StatusEntry::new(3355, "DPL_CODE_MISMATCH", "code mismatch"),
    StatusEntry::new(3356, "DPL_NOTINIT", "db has not been initialized"),
    StatusEntry::new(3357, "DPL_NOTEXIST", "trf. for old db's does not exist"),
    StatusEntry::new(4864, "DPL_NOTOK", "not ok"),
    StatusEntry::new(4865, "DPL_IVAPPL", "invalid database system appl"),
    StatusEntry::new(4866, "DPL_NOT_AVAILABLE", "database not available"),
    StatusEntry::new(4867, "DPL_NO_CODELIST", "no codelist found"),
    StatusEntry::new(4868, "DPL_TO_MANY_CODELISTS", "more then DPL_MAX_CODELISTS found"),
    StatusEntry::new(3840, "FIL_NO_ERROR", "Operation completed successfully"),
    StatusEntry::new(3845, "FIL_FILNAME_NOT_FOUND", "File name not found"),
    StatusEntry::new(3880, "FIL_NO_MAKE_DIRECTORY", "Cannot create directory"),
    StatusEntry::new(3886, "FIL_RENAME_FILE_FAILED", "Rename of file failed"),
    StatusEntry::new(3888, "FIL_INVALID_PATH", "Invalid path specified"),
    StatusEntry::new(3898, "FIL_FILE_NOT_DELETED", "Cannot delete file"),
    StatusEntry::new(3906, "FIL_ILLEGAL_ORIGIN", "Illegal origin"),
    StatusEntry::new(3924, "FIL_END_OF_FILE", "End of file reached"),
    StatusEntry::new(3931, "FIL_NO_MORE_ROOM_ON_MEDIUM", "Medium full"),
    StatusEntry::new(3932, "FIL_PATTERN_DOES_NOT_MATCH", "Pattern does not match file names"),
    StatusEntry::new(3948, "FIL_FILE_ALREADY_OPEND_FOR_WR", "File is already open with write permission"),
    StatusEntry::new(3957, "FIL_WRITE_TO_MEDIUM_FAILED", "Write operation to medium failed"),
    StatusEntry::new(3963, "FIL_START_SEARCH_NOT_CALLED", "FIL_StartList not called"),
    StatusEntry::new(3964, "FIL_NO_STORAGE_MEDIUM_IN_DEVICE", "No medium existent in device"),
    StatusEntry::new(3965, "FIL_ILLEGAL_FILE_OPEN_TYPE", "Illegal file open type"),
    StatusEntry::new(3966, "FIL_MEDIUM_NEWLY_INSERTED", "Medium freshly inserted into device"),
    StatusEntry::new(3967, "FIL_MEMORY_FAILED", "Memory failure. No more memory available"),
    StatusEntry::new(3968, "FIL_FATAL_ERROR", "Fatal error during file operation"),
    StatusEntry::new(3969, "FIL_FAT_ERROR", "Fatal error in file allocation table"),
    StatusEntry::new(3970, "FIL_ILLEGAL_DRIVE", "Illegal drive chosen"),
    StatusEntry::new(3971, "FIL_INVALID_FILE_DESCR", "Illegal file descriptor"),
    StatusEntry::new(3972, "FIL_SEEK_FAILED", "Seek failed"),
    StatusEntry::new(3973, "FIL_CANNOT_DELETE", "Cannot delete file"),
    StatusEntry::new(3974, "FIL_MEDIUM_WRITE_PROTECTED", "Medium is write protected"),
    StatusEntry::new(3975, "FIL_BATTERY_LOW", "Medium backup battery is low"),
    StatusEntry::new(3976, "FIL_BAD_FORMAT", "Bad medium format"),
    StatusEntry::new(3977, "FIL_UNSUPPORTED_MEDIUM", "Unsupported PC-Card detected"),
    StatusEntry::new(3978, "FIL_RENAME_DIR_FAILED", "Directory exists already"),
    StatusEntry::new(5121, "WIR_PTNR_OVERFLOW", "point number overflow"),
    StatusEntry::new(5122, "WIR_NUM_ASCII_CARRY", "carry from number to ascii conversion"),
    StatusEntry::new(5123, "WIR_PTNR_NO_INC", "can't increment point number"),
    StatusEntry::new(5124, "WIR_STEP_SIZE", "wrong step size"),
    StatusEntry::new(5125, "WIR_BUSY", "resource occupied"),
    StatusEntry::new(5127, "WIR_CONFIG_FNC", "user function selected"),
    StatusEntry::new(5128, "WIR_CANT_OPEN_FILE", "can't open file"),
    StatusEntry::new(5129, "WIR_FILE_WRITE_ERROR", "can't write into file"),
    StatusEntry::new(5130, "WIR_MEDIUM_NOMEM", "no anymore memory on PC-Card"),
    StatusEntry::new(5131, "WIR_NO_MEDIUM", "no PC-Card"),
    StatusEntry::new(5132, "WIR_EMPTY_FILE", "empty GSI file"),
    StatusEntry::new(5133, "WIR_INVALID_DATA", "invalid data in GSI file"),
    StatusEntry::new(5134, "WIR_F2_BUTTON", "F2 button pressed"),
    StatusEntry::new(5135, "WIR_F3_BUTTON", "F3 button pressed"),
    StatusEntry::new(5136, "WIR_F4_BUTTON", "F4 button pressed"),
    StatusEntry::new(5137, "WIR_F5_BUTTON", "F5 button pressed"),
    StatusEntry::new(5138, "WIR_F6_BUTTON", "F6 button pressed"),
    StatusEntry::new(5139, "WIR_SHF2_BUTTON", "SHIFT F2 button pressed"),
    StatusEntry::new(8704, "AUT_TIMEOUT", "Position not reached"),
    StatusEntry::new(8705, "AUT_DETENT_ERROR", "Positioning not possible due to mounted EDM"),
    StatusEntry::new(8706, "AUT_ANGLE_ERROR", "Angle measurement error"),
    StatusEntry::new(8707, "AUT_MOTOR_ERROR", "Motorization error"),
    StatusEntry::new(8708, "AUT_INCACC", "Position not exactly reached"),
    StatusEntry::new(8709, "AUT_DEV_ERROR", "Deviation measurement error"),
    StatusEntry::new(8710, "AUT_NO_TARGET", "No target detected"),
    StatusEntry::new(8711, "AUT_MULTIPLE_TARGETS", "Multiple target detected"),
    StatusEntry::new(8712, "AUT_BAD_ENVIRONMENT", "Bad environment conditions"),
    StatusEntry::new(8713, "AUT_DETECTOR_ERROR", "Error in target acquisition"),
    StatusEntry::new(8714, "AUT_NOT_ENABLED", "Target acquisition not enabled"),
    StatusEntry::new(8715, "AUT_CALACC", "ATR-Calibration failed"),
    StatusEntry::new(8716, "AUT_ACCURACY", "Target position not exactly reached"),
    StatusEntry::new(8717, "AUT_DIST_STARTED", "Info dist. Measurement has been started"),
    StatusEntry::new(9217, "BAP_CHANGE_ALL_TO_DIST", "Command changed from ALL to DIST"),
    StatusEntry::new(9473, "SAP_ILLEGAL_SYSMENU_NUM", "Illegal system menu number"),
    StatusEntry::new(9728, "COD_LIST_NOT_VALID", "List not initialized"),
    StatusEntry::new(9729, "COD_SHORTCUT_UNKNOWN", "Shortcut or code unknown"),
    StatusEntry::new(9730, "COD_NOT_SELECTED", "Codelist selection wasn't possible"),
    StatusEntry::new(9731, "COD_MANDATORY_FAIL", "Mandatory field has no valid value"),
    StatusEntry::new(9732, "COD_NO_MORE_ATTRIB", "maximal number of attr. are defined"),
    StatusEntry::new(9984, "BAS_ILL_OPCODE", "Illegal opcode"),
    StatusEntry::new(9985, "BAS_DIV_BY_ZERO", "Division by Zero occured"),
    StatusEntry::new(9986, "BAS_STACK_UNDERFLOW", "Interpreter stack underflow"),
    StatusEntry::new(9987, "BAS_STACK_OVERFLOW", "Interpreter stack overflow"),
    StatusEntry::new(9988, "BAS_NO_DLG_EXIST", "No dialog is defined"),
    StatusEntry::new(9989, "BAS_DLG_ALREADY_EXIST", "Only one dialog may be defined at once"),
    StatusEntry::new(9990, "BAS_INSTALL_ERR", "General error during installation"),
    StatusEntry::new(9995, "BAS_FIL_INV_MODE", "Invalid file access mode"),
    StatusEntry::new(9996, "BAS_FIL_TABLE_FULL", "Maximum number of open files overflow"),
    StatusEntry::new(9997, "BAS_FIL_ILL_NAME", "Illegal file name"),
    StatusEntry::new(9998, "BAS_FIL_ILL_POS", "Illegal file position, hence < 1"),
    StatusEntry::new(9999, "BAS_FIL_ILL_OPER", "Illegal operation on this kind of file"),
    StatusEntry::new(10000, "BAS_MENU_ID_INVALID", "Invalid menu id detected"),
    StatusEntry::new(10001, "BAS_MENU_TABLE_FULL", "Internal menu id table overflow"),
    StatusEntry::new(10240, "IOS_CHNL_DISABLED", "channel is disabled"),
    StatusEntry::new(10241, "IOS_NO_MORE_CHAR", "no more data available"),
    StatusEntry::new(10242, "IOS_MAX_BLOCK_LEN", "reached max. block length"),
    StatusEntry::new(10243, "IOS_HW_BUF_OVERRUN", "hardware buffer overrun (highest priority)"),
    StatusEntry::new(10244, "IOS_PARITY_ERROR", "parity error"),
    StatusEntry::new(10245, "IOS_FRAMING_ERROR", "framing error"),
    StatusEntry::new(10246, "IOS_DECODE_ERROR", "decode error"),
    StatusEntry::new(10247, "IOS_CHKSUM_ERROR", "checksum error (lowest priority)"),
    StatusEntry::new(10248, "IOS_COM_ERROR", "general communication error"),
    StatusEntry::new(10280, "IOS_FL_RD_ERROR", "flash read error"),
    StatusEntry::new(10281, "IOS_FL_WR_ERROR", "flash write error"),
    StatusEntry::new(10282, "IOS_FL_CL_ERROR", "flash erase error"),
    StatusEntry::new(10497, "CNF_INI_NOTOPEN", "INI-file not opened"),
    StatusEntry::new(10498, "CNF_INI_NOTFOUND", "Warning Could not find section or key"),
    StatusEntry::new(10499, "CNF_CONT", "Return code of system function"),
    StatusEntry::new(10500, "CNF_ESC", "Return code of system function"),
    StatusEntry::new(10501, "CNF_QUIT", "Return code of system function"),
    StatusEntry::new(10502, "CNF_DATA_INVALID", "Config. file data not valid"),
    StatusEntry::new(10503, "CNF_DATA_OVERFLOW", "Config. file data exceed valid amount"),
    StatusEntry::new(10504, "CNF_NOT_COMPLETE", "Config. file data not complete"),
    StatusEntry::new(10505, "CNF_DLG_CNT_OVERFLOW", "Too many executed dialogs"),
    StatusEntry::new(10506, "CNF_NOT_EXECUTABLE", "Item not executable"),
    StatusEntry::new(10507, "CNF_AEXE_OVERFLOW", "Autoexec table full"),
    StatusEntry::new(10508, "CNF_PAR_LOAD_ERR", "Error in loading parameter"),
    StatusEntry::new(10509, "CNF_PAR_SAVE_ERR", "Error in saving parameter"),
    StatusEntry::new(10510, "CNF_FILE_MISSING", "Parameter filename/path not valid"),
    StatusEntry::new(10511, "CNF_SECTION_MISSING", "Section in parameter file missing"),
    StatusEntry::new(10512, "CNF_HEADER_FAIL", "Default file wrong or an entry is missing"),
    StatusEntry::new(10513, "CNF_PARMETER_FAIL", "Parameter-line not complete or missing"),
    StatusEntry::new(10514, "CNF_PARMETER_SET", "Parameter-set caused an error"),
    StatusEntry::new(10515, "CNF_RECMASK_FAIL", "RecMask-line not complete or missing"),
    StatusEntry::new(10516, "CNF_RECMASK_SET", "RecMask-set caused an error"),
    StatusEntry::new(10517, "CNF_MEASDLGLIST_FAIL", "MeasDlgList-line not complete or missing"),
    StatusEntry::new(10518, "CNF_MEASDLGLIST_SET", "MeasDlgList-set caused an error"),
    StatusEntry::new(10519, "CNF_APPL_OVERFLOW", "Application table full"),
];
