//! The source-type catalog: per-kind positional schemas, input shapes, and
//! output formats. Column indices are zero-based and mirror the upstream
//! export layouts exactly; unused input columns are simply never referenced.

use crate::constants::{ORG_PREFIX, PRINTER_NA_SHEET};
use crate::reader::SheetRef;
use crate::schema::{ColumnSource, FieldSpec, Normalize, RecordSchema};
use crate::sink::OutputFormat;

use ColumnSource::{Column, Const};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    Servers,
    EndUserDevices,
    MobileDevices,
    Terminals,
    NetworkNa,
    NetworkAsia,
    PrinterNa,
    PrinterChina,
    PrinterJapan,
}

impl SourceType {
    /// Human-readable process name used in notifications and reports.
    pub fn process_name(&self) -> &'static str {
        match self {
            SourceType::Servers => "Servers",
            SourceType::EndUserDevices => "End User Devices",
            SourceType::MobileDevices => "Intune Report",
            SourceType::Terminals => "Terminals",
            SourceType::NetworkNa | SourceType::NetworkAsia => "Network Devices",
            SourceType::PrinterNa | SourceType::PrinterChina | SourceType::PrinterJapan => {
                "Printers"
            }
        }
    }

    /// Allowed input extension (lowercase, with dot) for this source type.
    pub fn allowed_extension(&self) -> &'static str {
        match self {
            SourceType::Servers
            | SourceType::EndUserDevices
            | SourceType::MobileDevices
            | SourceType::NetworkAsia => ".csv",
            SourceType::Terminals
            | SourceType::NetworkNa
            | SourceType::PrinterNa
            | SourceType::PrinterChina
            | SourceType::PrinterJapan => ".xlsx",
        }
    }
}

/// How the input file for a source type is read.
#[derive(Debug, Clone, Copy)]
pub enum InputKind {
    Csv { skip_header: bool },
    Xlsx { sheet: SheetRef, header_rows: usize },
}

/// Everything the orchestrator needs to run one source type.
pub struct SourceDef {
    pub source: SourceType,
    pub schema: &'static RecordSchema,
    pub input: InputKind,
    pub output: OutputFormat,
}

/* Servers */

const SERVER_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "ChassisType", title: "Chassis Type", source: Column(0) },
    FieldSpec { name: "ComputerId", title: "Computer Id", source: Column(1) },
    FieldSpec { name: "ComputerName", title: "Computer Name", source: Column(2) },
    FieldSpec { name: "SerialNumber", title: "Serial Number", source: Column(3) },
    FieldSpec { name: "OsPlatform", title: "OS Platform", source: Column(4) },
    FieldSpec { name: "OperatingSystem", title: "Operating System", source: Column(5) },
    FieldSpec { name: "ServicePack", title: "Service Pack", source: Column(6) },
    FieldSpec { name: "Manufacturer", title: "Manufacturer", source: Column(7) },
    FieldSpec { name: "IPAddress", title: "IP Address", source: Column(8) },
    FieldSpec { name: "CreatedDate", title: "Created Date", source: Column(9) },
    FieldSpec { name: "UpdatedDate", title: "Updated Date", source: Column(10) },
    FieldSpec { name: "LastSeen", title: "Last Seen", source: Column(11) },
    FieldSpec { name: "IsVirtual", title: "Is Virtual", source: Column(12) },
    FieldSpec { name: "OSVersion", title: "OS Version", source: Column(13) },
    FieldSpec { name: "SourceID", title: "Source ID", source: Column(14) },
    FieldSpec { name: "Model", title: "Model", source: Column(15) },
    FieldSpec { name: "Count", title: "Count", source: Column(16) },
];

pub const SERVER_SCHEMA: RecordSchema = RecordSchema {
    kind: "Server",
    fields: SERVER_FIELDS,
    key: 2,
    min_fields: 17,
    required: &[],
    normalize: Some(Normalize {
        field: 2,
        strip_prefix: Some(ORG_PREFIX),
        strip_domain: true,
        strip_login: true,
    }),
    skip_first_raw: true,
};

pub const SERVERS: SourceDef = SourceDef {
    source: SourceType::Servers,
    schema: &SERVER_SCHEMA,
    input: InputKind::Csv { skip_header: false },
    output: OutputFormat::Csv,
};

/* End user devices */

const EUD_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "ChassisType", title: "Chassis Type", source: Column(0) },
    FieldSpec { name: "CpuName", title: "CPU Name", source: Column(1) },
    FieldSpec { name: "ComputerId", title: "Computer Id", source: Column(2) },
    FieldSpec { name: "ComputerName", title: "Computer Name", source: Column(3) },
    FieldSpec { name: "SerialNumber", title: "Serial Number", source: Column(4) },
    FieldSpec { name: "OsPlatform", title: "OS Platform", source: Column(5) },
    FieldSpec { name: "OperatingSystem", title: "Operating System", source: Column(6) },
    FieldSpec { name: "ServicePack", title: "Service Pack", source: Column(7) },
    FieldSpec { name: "Manufacturer", title: "Manufacturer", source: Column(8) },
    FieldSpec { name: "Model", title: "Model", source: Column(9) },
    FieldSpec { name: "IPAddress", title: "IP Address", source: Column(10) },
    FieldSpec { name: "UserName", title: "User Name", source: Column(11) },
    FieldSpec { name: "CreatedDate", title: "Created Date", source: Column(12) },
    FieldSpec { name: "UpdatedDate", title: "Updated Date", source: Column(13) },
    FieldSpec { name: "LastSeen", title: "Last Seen", source: Column(14) },
    FieldSpec { name: "IsVirtual", title: "Is Virtual", source: Column(15) },
    FieldSpec { name: "OSVersion", title: "OS Version", source: Column(16) },
    FieldSpec { name: "Count", title: "Count", source: Column(17) },
];

pub const EUD_SCHEMA: RecordSchema = RecordSchema {
    kind: "EndUserDevice",
    fields: EUD_FIELDS,
    key: 4,
    min_fields: 18,
    required: &[],
    normalize: Some(Normalize {
        field: 3,
        strip_prefix: Some(ORG_PREFIX),
        strip_domain: true,
        strip_login: true,
    }),
    skip_first_raw: true,
};

pub const END_USER_DEVICES: SourceDef = SourceDef {
    source: SourceType::EndUserDevices,
    schema: &EUD_SCHEMA,
    input: InputKind::Csv { skip_header: false },
    output: OutputFormat::Xlsx { sheet: "Tanium_EUD" },
};

/* Mobile devices */

const MOBILE_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "DeviceID", title: "Device ID", source: Column(0) },
    FieldSpec { name: "DeviceName", title: "Device name", source: Column(1) },
    FieldSpec { name: "EnrollmentDate", title: "Enrollment date", source: Column(2) },
    FieldSpec { name: "LastCheckin", title: "Last check-in", source: Column(3) },
    FieldSpec { name: "AzureAdDeviceID", title: "Azure AD Device ID", source: Column(4) },
    FieldSpec { name: "OsVersion", title: "OS version", source: Column(5) },
    FieldSpec { name: "AzureAdRegistered", title: "Azure AD registered", source: Column(6) },
    FieldSpec { name: "EasActivationID", title: "EAS activation ID", source: Column(7) },
    FieldSpec { name: "SerialNumber", title: "Serial number", source: Column(8) },
    FieldSpec { name: "Manufacturer", title: "Manufacturer", source: Column(9) },
    FieldSpec { name: "Model", title: "Model", source: Column(10) },
    FieldSpec { name: "EasActivated", title: "EAS activated", source: Column(11) },
    FieldSpec { name: "Imei", title: "IMEI", source: Column(12) },
    FieldSpec { name: "LastEasSyncTime", title: "Last EAS sync time", source: Column(13) },
    FieldSpec { name: "EasReason", title: "EAS reason", source: Column(14) },
    FieldSpec { name: "EasStatus", title: "EAS status", source: Column(15) },
    FieldSpec { name: "ComplianceGracePeriodExpiration", title: "Compliance grace period expiration", source: Column(16) },
    FieldSpec { name: "SecurityPatchLevel", title: "Security patch level", source: Column(17) },
    FieldSpec { name: "WifiMac", title: "Wi-Fi MAC", source: Column(18) },
    FieldSpec { name: "Meid", title: "MEID", source: Column(19) },
    FieldSpec { name: "SubscriberCarrier", title: "Subscriber carrier", source: Column(20) },
    FieldSpec { name: "TotalStorage", title: "Total storage", source: Column(21) },
    FieldSpec { name: "FreeStorage", title: "Free storage", source: Column(22) },
    FieldSpec { name: "ManagementName", title: "Management name", source: Column(23) },
    FieldSpec { name: "Category", title: "Category", source: Column(24) },
    FieldSpec { name: "UserId", title: "UserId", source: Column(25) },
    FieldSpec { name: "PrimaryUserUpn", title: "Primary user UPN", source: Column(26) },
    FieldSpec { name: "PrimaryUserEmailAddress", title: "Primary user email address", source: Column(27) },
    FieldSpec { name: "PrimaryUserDisplayName", title: "Primary user display name", source: Column(28) },
    FieldSpec { name: "WifiIpv4Address", title: "WiFiIPv4Address", source: Column(29) },
    FieldSpec { name: "WifiSubnetID", title: "WiFiSubnetID", source: Column(30) },
    FieldSpec { name: "Compliance", title: "Compliance", source: Column(31) },
    FieldSpec { name: "ManagedBy", title: "Managed by", source: Column(32) },
    FieldSpec { name: "Ownership", title: "Ownership", source: Column(33) },
    FieldSpec { name: "DeviceState", title: "Device state", source: Column(34) },
    FieldSpec { name: "IntuneRegistered", title: "Intune registered", source: Column(35) },
    FieldSpec { name: "Supervised", title: "Supervised", source: Column(36) },
    FieldSpec { name: "Encrypted", title: "Encrypted", source: Column(37) },
    FieldSpec { name: "Os", title: "OS", source: Column(38) },
    FieldSpec { name: "SkuFamily", title: "SkuFamily", source: Column(39) },
    FieldSpec { name: "JoinType", title: "JoinType", source: Column(40) },
    FieldSpec { name: "PhoneNumber", title: "Phone number", source: Column(41) },
    FieldSpec { name: "Jailbroken", title: "Jailbroken", source: Column(42) },
    FieldSpec { name: "Iccid", title: "ICCID", source: Column(43) },
    FieldSpec { name: "EthernetMac", title: "EthernetMAC", source: Column(44) },
    FieldSpec { name: "CellularTechnology", title: "CellularTechnology", source: Column(45) },
    FieldSpec { name: "ProcessorArchitecture", title: "ProcessorArchitecture", source: Column(46) },
    FieldSpec { name: "Eid", title: "EID", source: Column(47) },
    FieldSpec { name: "SystemManagementBiosVersion", title: "SystemManagementBIOSVersion", source: Column(48) },
    FieldSpec { name: "TpmManufacturerId", title: "TPMManufacturerId", source: Column(49) },
    FieldSpec { name: "TpmManufacturerVersion", title: "TPMManufacturerVersion", source: Column(50) },
    FieldSpec { name: "ProductName", title: "ProductName", source: Column(51) },
    FieldSpec { name: "ManagementCertificateExpirationDate", title: "Management certificate expiration date", source: Column(52) },
];

pub const MOBILE_SCHEMA: RecordSchema = RecordSchema {
    kind: "MobileDevice",
    fields: MOBILE_FIELDS,
    key: 8,
    min_fields: 53,
    required: &[],
    normalize: None,
    skip_first_raw: false,
};

pub const MOBILE_DEVICES: SourceDef = SourceDef {
    source: SourceType::MobileDevices,
    schema: &MOBILE_SCHEMA,
    input: InputKind::Csv { skip_header: false },
    output: OutputFormat::Xlsx { sheet: "iOS" },
};

/* Terminals */

const TERMINAL_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "DeviceName", title: "Device Name", source: Column(0) },
    FieldSpec { name: "Model", title: "Model", source: Column(7) },
    FieldSpec { name: "OSVersion", title: "OS Version", source: Column(8) },
    FieldSpec { name: "SerialNumber", title: "Serial Number", source: Column(1) },
    FieldSpec { name: "Location", title: "Location", source: Column(9) },
    // Upstream consumers expect the "OimeZone" title as-is
    FieldSpec { name: "TimeZone", title: "OimeZone", source: Column(10) },
    FieldSpec { name: "Locale", title: "Locale", source: Column(12) },
    FieldSpec { name: "Group", title: "Group", source: Column(16) },
];

pub const TERMINAL_SCHEMA: RecordSchema = RecordSchema {
    kind: "Terminal",
    fields: TERMINAL_FIELDS,
    key: 3,
    min_fields: 0,
    required: &[1],
    normalize: None,
    skip_first_raw: false,
};

pub const TERMINALS: SourceDef = SourceDef {
    source: SourceType::Terminals,
    schema: &TERMINAL_SCHEMA,
    input: InputKind::Xlsx {
        sheet: SheetRef::First,
        header_rows: 1,
    },
    output: OutputFormat::Xlsx { sheet: "Terminals" },
};

/* Network, two regional variants sharing one output shape */

const NETWORK_NA_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "Country", title: "Country", source: Const("North America") },
    FieldSpec { name: "HostName", title: "Hostname", source: Column(0) },
    FieldSpec { name: "SerialNumber", title: "Serial Number", source: Column(2) },
    FieldSpec { name: "ModelName", title: "Model Name", source: Column(7) },
    FieldSpec { name: "CountryLocation", title: "CountryLocation", source: Column(11) },
];

pub const NETWORK_NA_SCHEMA: RecordSchema = RecordSchema {
    kind: "Network",
    fields: NETWORK_NA_FIELDS,
    key: 1,
    min_fields: 0,
    // Hostname and IP address cannot be empty
    required: &[0, 1],
    normalize: Some(Normalize {
        field: 1,
        strip_prefix: None,
        strip_domain: true,
        strip_login: true,
    }),
    skip_first_raw: false,
};

const NETWORK_ASIA_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "Country", title: "Country", source: Const("Asia") },
    FieldSpec { name: "HostName", title: "Hostname", source: Column(0) },
    FieldSpec { name: "SerialNumber", title: "Serial Number", source: Column(7) },
    FieldSpec { name: "ModelName", title: "Model Name", source: Column(10) },
    FieldSpec { name: "CountryLocation", title: "CountryLocation", source: Column(11) },
];

pub const NETWORK_ASIA_SCHEMA: RecordSchema = RecordSchema {
    kind: "Network",
    fields: NETWORK_ASIA_FIELDS,
    key: 1,
    min_fields: 12,
    // Hostname and IP address cannot be empty
    required: &[0, 3],
    normalize: Some(Normalize {
        field: 1,
        strip_prefix: None,
        strip_domain: true,
        strip_login: true,
    }),
    skip_first_raw: false,
};

pub const NETWORK_NA: SourceDef = SourceDef {
    source: SourceType::NetworkNa,
    schema: &NETWORK_NA_SCHEMA,
    input: InputKind::Xlsx {
        sheet: SheetRef::First,
        header_rows: 1,
    },
    output: OutputFormat::Xlsx { sheet: "Network" },
};

pub const NETWORK_ASIA: SourceDef = SourceDef {
    source: SourceType::NetworkAsia,
    schema: &NETWORK_ASIA_SCHEMA,
    input: InputKind::Csv { skip_header: true },
    output: OutputFormat::Xlsx { sheet: "Network" },
};

/* Printers, three regional variants sharing one output shape */

const PRINTER_NA_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "Country", title: "Country", source: Column(0) },
    FieldSpec { name: "Class", title: "Class", source: Const("Printer") },
    FieldSpec { name: "AssetTag", title: "AssetTag", source: Column(9) },
    FieldSpec { name: "SerialNumber", title: "SerialNumber", source: Column(10) },
    FieldSpec { name: "AssetStatus", title: "AssetStatus", source: Column(15) },
    FieldSpec { name: "Location", title: "Location", source: Column(21) },
    FieldSpec { name: "LocationDetail", title: "LocationDetail", source: Column(0) },
    FieldSpec { name: "OwnedBy", title: "OwnedBy", source: Const("") },
    FieldSpec { name: "Model", title: "Model", source: Column(13) },
    FieldSpec { name: "SupportGroup", title: "SupportGroup", source: Const("") },
];

pub const PRINTER_NA_SCHEMA: RecordSchema = RecordSchema {
    kind: "Printer",
    fields: PRINTER_NA_FIELDS,
    key: 3,
    min_fields: 0,
    required: &[10],
    normalize: None,
    skip_first_raw: false,
};

const PRINTER_CHINA_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "Country", title: "Country", source: Const("CHI") },
    FieldSpec { name: "Class", title: "Class", source: Const("Printer") },
    FieldSpec { name: "AssetTag", title: "AssetTag", source: Const("") },
    FieldSpec { name: "SerialNumber", title: "SerialNumber", source: Column(0) },
    FieldSpec { name: "AssetStatus", title: "AssetStatus", source: Column(4) },
    FieldSpec { name: "Location", title: "Location", source: Column(3) },
    FieldSpec { name: "LocationDetail", title: "LocationDetail", source: Const("") },
    FieldSpec { name: "OwnedBy", title: "OwnedBy", source: Const("") },
    FieldSpec { name: "Model", title: "Model", source: Column(2) },
    FieldSpec { name: "SupportGroup", title: "SupportGroup", source: Const("") },
];

pub const PRINTER_CHINA_SCHEMA: RecordSchema = RecordSchema {
    kind: "Printer",
    fields: PRINTER_CHINA_FIELDS,
    key: 3,
    min_fields: 0,
    required: &[0],
    normalize: None,
    skip_first_raw: false,
};

// The Japan export checks the first cell for a usable value but carries the
// serial number in column 4.
const PRINTER_JAPAN_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "Country", title: "Country", source: Const("JAP") },
    FieldSpec { name: "Class", title: "Class", source: Const("Printer") },
    FieldSpec { name: "AssetTag", title: "AssetTag", source: Column(0) },
    FieldSpec { name: "SerialNumber", title: "SerialNumber", source: Column(3) },
    FieldSpec { name: "AssetStatus", title: "AssetStatus", source: Const("Active") },
    FieldSpec { name: "Location", title: "Location", source: Column(10) },
    FieldSpec { name: "LocationDetail", title: "LocationDetail", source: Column(10) },
    FieldSpec { name: "OwnedBy", title: "OwnedBy", source: Column(6) },
    FieldSpec { name: "Model", title: "Model", source: Column(2) },
    FieldSpec { name: "SupportGroup", title: "SupportGroup", source: Const("") },
];

pub const PRINTER_JAPAN_SCHEMA: RecordSchema = RecordSchema {
    kind: "Printer",
    fields: PRINTER_JAPAN_FIELDS,
    key: 3,
    min_fields: 0,
    required: &[0],
    normalize: None,
    skip_first_raw: false,
};

pub const PRINTER_NA: SourceDef = SourceDef {
    source: SourceType::PrinterNa,
    schema: &PRINTER_NA_SCHEMA,
    input: InputKind::Xlsx {
        sheet: SheetRef::Named(PRINTER_NA_SHEET),
        header_rows: 1,
    },
    output: OutputFormat::Xlsx { sheet: "Printers" },
};

pub const PRINTER_CHINA: SourceDef = SourceDef {
    source: SourceType::PrinterChina,
    schema: &PRINTER_CHINA_SCHEMA,
    input: InputKind::Xlsx {
        sheet: SheetRef::First,
        header_rows: 1,
    },
    output: OutputFormat::Xlsx { sheet: "Printers" },
};

pub const PRINTER_JAPAN: SourceDef = SourceDef {
    source: SourceType::PrinterJapan,
    schema: &PRINTER_JAPAN_SCHEMA,
    input: InputKind::Xlsx {
        sheet: SheetRef::First,
        header_rows: 2,
    },
    output: OutputFormat::Xlsx { sheet: "Printers" },
};
