//! Raw types for the ONNX Runtime C API.
//!
//! This crate carries no link-time dependency on ONNX Runtime: the shared
//! library is opened at runtime by `dynort`, and every call goes through the
//! function-pointer table declared here. The [`OrtApi`] struct must therefore
//! mirror the upstream `onnxruntime_c_api.h` field order exactly — a function
//! pointer is only ever as valid as its offset.

#![no_std]
#![allow(non_snake_case, non_camel_case_types)]

use core::ffi::{c_char, c_int, c_void};

/// The character type ONNX Runtime expects for filesystem paths
/// (`ORTCHAR_T`): UTF-16 on Windows, `char` everywhere else.
#[cfg(target_family = "windows")]
pub type ortchar = u16;
#[cfg(not(target_family = "windows"))]
pub type ortchar = c_char;

macro_rules! opaque {
	($($name:ident),+ $(,)?) => {
		$(
			#[repr(C)]
			#[derive(Debug, Copy, Clone)]
			pub struct $name {
				_unused: [u8; 0]
			}
		)+
	};
}

opaque! {
	OrtStatus,
	OrtEnv,
	OrtSession,
	OrtSessionOptions,
	OrtRunOptions,
	OrtValue,
	OrtMemoryInfo,
	OrtTensorTypeAndShapeInfo,
	OrtTypeInfo,
	OrtMapTypeInfo,
	OrtSequenceTypeInfo,
	OrtModelMetadata,
	OrtThreadingOptions,
	OrtIoBinding,
	OrtLoraAdapter,
	OrtPrepackedWeightsContainer,
}

/// Null means success; non-null is an [`OrtStatus`] the caller must release.
pub type OrtStatusPtr = *mut OrtStatus;

#[repr(i32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OrtErrorCode {
	ORT_OK = 0,
	ORT_FAIL = 1,
	ORT_INVALID_ARGUMENT = 2,
	ORT_NO_SUCHFILE = 3,
	ORT_NO_MODEL = 4,
	ORT_ENGINE_ERROR = 5,
	ORT_RUNTIME_EXCEPTION = 6,
	ORT_INVALID_PROTOBUF = 7,
	ORT_MODEL_LOADED = 8,
	ORT_NOT_IMPLEMENTED = 9,
	ORT_INVALID_GRAPH = 10,
	ORT_EP_FAIL = 11
}

#[repr(i32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OrtLoggingLevel {
	ORT_LOGGING_LEVEL_VERBOSE = 0,
	ORT_LOGGING_LEVEL_INFO = 1,
	ORT_LOGGING_LEVEL_WARNING = 2,
	ORT_LOGGING_LEVEL_ERROR = 3,
	ORT_LOGGING_LEVEL_FATAL = 4
}

#[repr(i32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ONNXType {
	ONNX_TYPE_UNKNOWN = 0,
	ONNX_TYPE_TENSOR = 1,
	ONNX_TYPE_SEQUENCE = 2,
	ONNX_TYPE_MAP = 3,
	ONNX_TYPE_OPAQUE = 4,
	ONNX_TYPE_SPARSETENSOR = 5,
	ONNX_TYPE_OPTIONAL = 6
}

#[repr(i32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ONNXTensorElementDataType {
	ONNX_TENSOR_ELEMENT_DATA_TYPE_UNDEFINED = 0,
	ONNX_TENSOR_ELEMENT_DATA_TYPE_FLOAT = 1,
	ONNX_TENSOR_ELEMENT_DATA_TYPE_UINT8 = 2,
	ONNX_TENSOR_ELEMENT_DATA_TYPE_INT8 = 3,
	ONNX_TENSOR_ELEMENT_DATA_TYPE_UINT16 = 4,
	ONNX_TENSOR_ELEMENT_DATA_TYPE_INT16 = 5,
	ONNX_TENSOR_ELEMENT_DATA_TYPE_INT32 = 6,
	ONNX_TENSOR_ELEMENT_DATA_TYPE_INT64 = 7,
	ONNX_TENSOR_ELEMENT_DATA_TYPE_STRING = 8,
	ONNX_TENSOR_ELEMENT_DATA_TYPE_BOOL = 9,
	ONNX_TENSOR_ELEMENT_DATA_TYPE_FLOAT16 = 10,
	ONNX_TENSOR_ELEMENT_DATA_TYPE_DOUBLE = 11,
	ONNX_TENSOR_ELEMENT_DATA_TYPE_UINT32 = 12,
	ONNX_TENSOR_ELEMENT_DATA_TYPE_UINT64 = 13,
	ONNX_TENSOR_ELEMENT_DATA_TYPE_COMPLEX64 = 14,
	ONNX_TENSOR_ELEMENT_DATA_TYPE_COMPLEX128 = 15,
	ONNX_TENSOR_ELEMENT_DATA_TYPE_BFLOAT16 = 16
}

#[repr(i32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OrtAllocatorType {
	OrtInvalidAllocator = -1,
	OrtDeviceAllocator = 0,
	OrtArenaAllocator = 1
}

#[repr(i32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OrtMemType {
	OrtMemTypeCPUInput = -2,
	OrtMemTypeCPUOutput = -1,
	OrtMemTypeDefault = 0
}

#[repr(i32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GraphOptimizationLevel {
	ORT_DISABLE_ALL = 0,
	ORT_ENABLE_BASIC = 1,
	ORT_ENABLE_EXTENDED = 2,
	ORT_ENABLE_ALL = 99
}

#[repr(i32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExecutionMode {
	ORT_SEQUENTIAL = 0,
	ORT_PARALLEL = 1
}

/// A pluggable allocator. Unlike the other handles this one is a transparent
/// struct whose function pointers are invoked directly (e.g. `Free`).
#[repr(C)]
pub struct OrtAllocator {
	pub version: u32,
	pub Alloc: Option<unsafe extern "system" fn(this_: *mut OrtAllocator, size: usize) -> *mut c_void>,
	pub Free: Option<unsafe extern "system" fn(this_: *mut OrtAllocator, p: *mut c_void)>,
	pub Info: Option<unsafe extern "system" fn(this_: *const OrtAllocator) -> *const OrtMemoryInfo>,
	pub Reserve: Option<unsafe extern "system" fn(this_: *mut OrtAllocator, size: usize) -> *mut c_void>
}

/// The bootstrap structure returned by the `OrtGetApiBase` symbol.
#[repr(C)]
pub struct OrtApiBase {
	pub GetApi: Option<unsafe extern "system" fn(version: u32) -> *const OrtApi>,
	pub GetVersionString: Option<unsafe extern "system" fn() -> *const c_char>
}

/// Placeholder signature for table entries this crate never invokes. The
/// slot still has to exist so that every later field lands on its upstream
/// offset; calling through one of these is unsound without transmuting to
/// the real signature first.
pub type Unused = Option<unsafe extern "system" fn()>;

/// The versioned ONNX Runtime dispatch table.
///
/// Field order is ABI: it matches `onnxruntime_c_api.h` up to and including
/// the API 20 additions (the LoRA adapter entries). Requesting a newer API
/// version from `GetApi` yields a strict superset of this prefix, so reading
/// these fields from any table of version ≥ 20 is sound. Entries added after
/// API 20 are not declared here.
#[repr(C)]
pub struct OrtApi {
	pub CreateStatus: Option<unsafe extern "system" fn(code: OrtErrorCode, msg: *const c_char) -> OrtStatusPtr>,
	pub GetErrorCode: Option<unsafe extern "system" fn(status: *const OrtStatus) -> OrtErrorCode>,
	pub GetErrorMessage: Option<unsafe extern "system" fn(status: *const OrtStatus) -> *const c_char>,
	pub CreateEnv: Option<unsafe extern "system" fn(log_severity_level: OrtLoggingLevel, logid: *const c_char, out: *mut *mut OrtEnv) -> OrtStatusPtr>,
	pub CreateEnvWithCustomLogger: Unused,
	pub EnableTelemetryEvents: Option<unsafe extern "system" fn(env: *const OrtEnv) -> OrtStatusPtr>,
	pub DisableTelemetryEvents: Option<unsafe extern "system" fn(env: *const OrtEnv) -> OrtStatusPtr>,
	pub CreateSession: Option<
		unsafe extern "system" fn(env: *const OrtEnv, model_path: *const ortchar, options: *const OrtSessionOptions, out: *mut *mut OrtSession) -> OrtStatusPtr
	>,
	pub CreateSessionFromArray: Option<
		unsafe extern "system" fn(
			env: *const OrtEnv,
			model_data: *const c_void,
			model_data_length: usize,
			options: *const OrtSessionOptions,
			out: *mut *mut OrtSession
		) -> OrtStatusPtr
	>,
	pub Run: Option<
		unsafe extern "system" fn(
			session: *mut OrtSession,
			run_options: *const OrtRunOptions,
			input_names: *const *const c_char,
			inputs: *const *const OrtValue,
			input_len: usize,
			output_names: *const *const c_char,
			output_names_len: usize,
			outputs: *mut *mut OrtValue
		) -> OrtStatusPtr
	>,
	pub CreateSessionOptions: Option<unsafe extern "system" fn(options: *mut *mut OrtSessionOptions) -> OrtStatusPtr>,
	pub SetOptimizedModelFilePath: Option<unsafe extern "system" fn(options: *mut OrtSessionOptions, optimized_model_filepath: *const ortchar) -> OrtStatusPtr>,
	pub CloneSessionOptions: Unused,
	pub SetSessionExecutionMode: Option<unsafe extern "system" fn(options: *mut OrtSessionOptions, execution_mode: ExecutionMode) -> OrtStatusPtr>,
	pub EnableProfiling: Option<unsafe extern "system" fn(options: *mut OrtSessionOptions, profile_file_prefix: *const ortchar) -> OrtStatusPtr>,
	pub DisableProfiling: Option<unsafe extern "system" fn(options: *mut OrtSessionOptions) -> OrtStatusPtr>,
	pub EnableMemPattern: Option<unsafe extern "system" fn(options: *mut OrtSessionOptions) -> OrtStatusPtr>,
	pub DisableMemPattern: Option<unsafe extern "system" fn(options: *mut OrtSessionOptions) -> OrtStatusPtr>,
	pub EnableCpuMemArena: Option<unsafe extern "system" fn(options: *mut OrtSessionOptions) -> OrtStatusPtr>,
	pub DisableCpuMemArena: Option<unsafe extern "system" fn(options: *mut OrtSessionOptions) -> OrtStatusPtr>,
	pub SetSessionLogId: Unused,
	pub SetSessionLogVerbosityLevel: Unused,
	pub SetSessionLogSeverityLevel: Option<unsafe extern "system" fn(options: *mut OrtSessionOptions, session_log_severity_level: c_int) -> OrtStatusPtr>,
	pub SetSessionGraphOptimizationLevel:
		Option<unsafe extern "system" fn(options: *mut OrtSessionOptions, graph_optimization_level: GraphOptimizationLevel) -> OrtStatusPtr>,
	pub SetIntraOpNumThreads: Option<unsafe extern "system" fn(options: *mut OrtSessionOptions, intra_op_num_threads: c_int) -> OrtStatusPtr>,
	pub SetInterOpNumThreads: Option<unsafe extern "system" fn(options: *mut OrtSessionOptions, inter_op_num_threads: c_int) -> OrtStatusPtr>,
	pub CreateCustomOpDomain: Unused,
	pub CustomOpDomain_Add: Unused,
	pub AddCustomOpDomain: Unused,
	pub RegisterCustomOpsLibrary: Unused,
	pub SessionGetInputCount: Option<unsafe extern "system" fn(session: *const OrtSession, out: *mut usize) -> OrtStatusPtr>,
	pub SessionGetOutputCount: Option<unsafe extern "system" fn(session: *const OrtSession, out: *mut usize) -> OrtStatusPtr>,
	pub SessionGetOverridableInitializerCount: Unused,
	pub SessionGetInputTypeInfo: Option<unsafe extern "system" fn(session: *const OrtSession, index: usize, type_info: *mut *mut OrtTypeInfo) -> OrtStatusPtr>,
	pub SessionGetOutputTypeInfo: Option<unsafe extern "system" fn(session: *const OrtSession, index: usize, type_info: *mut *mut OrtTypeInfo) -> OrtStatusPtr>,
	pub SessionGetOverridableInitializerTypeInfo: Unused,
	pub SessionGetInputName:
		Option<unsafe extern "system" fn(session: *const OrtSession, index: usize, allocator: *mut OrtAllocator, value: *mut *mut c_char) -> OrtStatusPtr>,
	pub SessionGetOutputName:
		Option<unsafe extern "system" fn(session: *const OrtSession, index: usize, allocator: *mut OrtAllocator, value: *mut *mut c_char) -> OrtStatusPtr>,
	pub SessionGetOverridableInitializerName: Unused,
	pub CreateRunOptions: Option<unsafe extern "system" fn(out: *mut *mut OrtRunOptions) -> OrtStatusPtr>,
	pub RunOptionsSetRunLogVerbosityLevel: Unused,
	pub RunOptionsSetRunLogSeverityLevel: Unused,
	pub RunOptionsSetRunTag: Option<unsafe extern "system" fn(options: *mut OrtRunOptions, run_tag: *const c_char) -> OrtStatusPtr>,
	pub RunOptionsGetRunLogVerbosityLevel: Unused,
	pub RunOptionsGetRunLogSeverityLevel: Unused,
	pub RunOptionsGetRunTag: Unused,
	pub RunOptionsSetTerminate: Option<unsafe extern "system" fn(options: *mut OrtRunOptions) -> OrtStatusPtr>,
	pub RunOptionsUnsetTerminate: Option<unsafe extern "system" fn(options: *mut OrtRunOptions) -> OrtStatusPtr>,
	pub CreateTensorAsOrtValue: Option<
		unsafe extern "system" fn(
			allocator: *mut OrtAllocator,
			shape: *const i64,
			shape_len: usize,
			type_: ONNXTensorElementDataType,
			out: *mut *mut OrtValue
		) -> OrtStatusPtr
	>,
	pub CreateTensorWithDataAsOrtValue: Option<
		unsafe extern "system" fn(
			info: *const OrtMemoryInfo,
			p_data: *mut c_void,
			p_data_len: usize,
			shape: *const i64,
			shape_len: usize,
			type_: ONNXTensorElementDataType,
			out: *mut *mut OrtValue
		) -> OrtStatusPtr
	>,
	pub IsTensor: Option<unsafe extern "system" fn(value: *const OrtValue, out: *mut c_int) -> OrtStatusPtr>,
	pub GetTensorMutableData: Option<unsafe extern "system" fn(value: *mut OrtValue, out: *mut *mut c_void) -> OrtStatusPtr>,
	pub FillStringTensor: Option<unsafe extern "system" fn(value: *mut OrtValue, s: *const *const c_char, s_len: usize) -> OrtStatusPtr>,
	pub GetStringTensorDataLength: Option<unsafe extern "system" fn(value: *const OrtValue, len: *mut usize) -> OrtStatusPtr>,
	pub GetStringTensorContent:
		Option<unsafe extern "system" fn(value: *const OrtValue, s: *mut c_void, s_len: usize, offsets: *mut usize, offsets_len: usize) -> OrtStatusPtr>,
	pub CastTypeInfoToTensorInfo: Option<unsafe extern "system" fn(type_info: *const OrtTypeInfo, out: *mut *const OrtTensorTypeAndShapeInfo) -> OrtStatusPtr>,
	pub GetOnnxTypeFromTypeInfo: Option<unsafe extern "system" fn(type_info: *const OrtTypeInfo, out: *mut ONNXType) -> OrtStatusPtr>,
	pub CreateTensorTypeAndShapeInfo: Unused,
	pub SetTensorElementType: Unused,
	pub SetDimensions: Unused,
	pub GetTensorElementType: Option<unsafe extern "system" fn(info: *const OrtTensorTypeAndShapeInfo, out: *mut ONNXTensorElementDataType) -> OrtStatusPtr>,
	pub GetDimensionsCount: Option<unsafe extern "system" fn(info: *const OrtTensorTypeAndShapeInfo, out: *mut usize) -> OrtStatusPtr>,
	pub GetDimensions:
		Option<unsafe extern "system" fn(info: *const OrtTensorTypeAndShapeInfo, dim_values: *mut i64, dim_values_length: usize) -> OrtStatusPtr>,
	pub GetSymbolicDimensions: Unused,
	pub GetTensorShapeElementCount: Option<unsafe extern "system" fn(info: *const OrtTensorTypeAndShapeInfo, out: *mut usize) -> OrtStatusPtr>,
	pub GetTensorTypeAndShape: Option<unsafe extern "system" fn(value: *const OrtValue, out: *mut *mut OrtTensorTypeAndShapeInfo) -> OrtStatusPtr>,
	pub GetTypeInfo: Unused,
	pub GetValueType: Option<unsafe extern "system" fn(value: *const OrtValue, out: *mut ONNXType) -> OrtStatusPtr>,
	pub CreateMemoryInfo: Unused,
	pub CreateCpuMemoryInfo: Option<unsafe extern "system" fn(type_: OrtAllocatorType, mem_type: OrtMemType, out: *mut *mut OrtMemoryInfo) -> OrtStatusPtr>,
	pub CompareMemoryInfo: Unused,
	pub MemoryInfoGetName: Unused,
	pub MemoryInfoGetId: Unused,
	pub MemoryInfoGetMemType: Unused,
	pub MemoryInfoGetType: Unused,
	pub AllocatorAlloc: Unused,
	pub AllocatorFree: Option<unsafe extern "system" fn(ort_allocator: *mut OrtAllocator, p: *mut c_void) -> OrtStatusPtr>,
	pub AllocatorGetInfo: Unused,
	pub GetAllocatorWithDefaultOptions: Option<unsafe extern "system" fn(out: *mut *mut OrtAllocator) -> OrtStatusPtr>,
	pub AddFreeDimensionOverride: Unused,
	pub GetValue: Option<unsafe extern "system" fn(value: *const OrtValue, index: c_int, allocator: *mut OrtAllocator, out: *mut *mut OrtValue) -> OrtStatusPtr>,
	pub GetValueCount: Option<unsafe extern "system" fn(value: *const OrtValue, out: *mut usize) -> OrtStatusPtr>,
	pub CreateValue: Unused,
	pub CreateOpaqueValue: Unused,
	pub GetOpaqueValue: Unused,
	pub KernelInfoGetAttribute_float: Unused,
	pub KernelInfoGetAttribute_int64: Unused,
	pub KernelInfoGetAttribute_string: Unused,
	pub KernelContext_GetInputCount: Unused,
	pub KernelContext_GetOutputCount: Unused,
	pub KernelContext_GetInput: Unused,
	pub KernelContext_GetOutput: Unused,
	pub ReleaseEnv: Option<unsafe extern "system" fn(input: *mut OrtEnv)>,
	pub ReleaseStatus: Option<unsafe extern "system" fn(input: *mut OrtStatus)>,
	pub ReleaseMemoryInfo: Option<unsafe extern "system" fn(input: *mut OrtMemoryInfo)>,
	pub ReleaseSession: Option<unsafe extern "system" fn(input: *mut OrtSession)>,
	pub ReleaseValue: Option<unsafe extern "system" fn(input: *mut OrtValue)>,
	pub ReleaseRunOptions: Option<unsafe extern "system" fn(input: *mut OrtRunOptions)>,
	pub ReleaseTypeInfo: Option<unsafe extern "system" fn(input: *mut OrtTypeInfo)>,
	pub ReleaseTensorTypeAndShapeInfo: Option<unsafe extern "system" fn(input: *mut OrtTensorTypeAndShapeInfo)>,
	pub ReleaseSessionOptions: Option<unsafe extern "system" fn(input: *mut OrtSessionOptions)>,
	pub ReleaseCustomOpDomain: Unused,
	pub GetDenotationFromTypeInfo: Unused,
	pub CastTypeInfoToMapTypeInfo: Option<unsafe extern "system" fn(type_info: *const OrtTypeInfo, out: *mut *const OrtMapTypeInfo) -> OrtStatusPtr>,
	pub CastTypeInfoToSequenceTypeInfo: Option<unsafe extern "system" fn(type_info: *const OrtTypeInfo, out: *mut *const OrtSequenceTypeInfo) -> OrtStatusPtr>,
	pub GetMapKeyType: Option<unsafe extern "system" fn(map_type_info: *const OrtMapTypeInfo, out: *mut ONNXTensorElementDataType) -> OrtStatusPtr>,
	pub GetMapValueType: Unused,
	pub GetSequenceElementType:
		Option<unsafe extern "system" fn(sequence_type_info: *const OrtSequenceTypeInfo, type_info: *mut *mut OrtTypeInfo) -> OrtStatusPtr>,
	pub ReleaseMapTypeInfo: Option<unsafe extern "system" fn(input: *mut OrtMapTypeInfo)>,
	pub ReleaseSequenceTypeInfo: Option<unsafe extern "system" fn(input: *mut OrtSequenceTypeInfo)>,
	pub SessionEndProfiling: Option<unsafe extern "system" fn(session: *mut OrtSession, allocator: *mut OrtAllocator, out: *mut *mut c_char) -> OrtStatusPtr>,
	pub SessionGetModelMetadata: Option<unsafe extern "system" fn(session: *const OrtSession, out: *mut *mut OrtModelMetadata) -> OrtStatusPtr>,
	pub ModelMetadataGetProducerName:
		Option<unsafe extern "system" fn(model_metadata: *const OrtModelMetadata, allocator: *mut OrtAllocator, value: *mut *mut c_char) -> OrtStatusPtr>,
	pub ModelMetadataGetGraphName:
		Option<unsafe extern "system" fn(model_metadata: *const OrtModelMetadata, allocator: *mut OrtAllocator, value: *mut *mut c_char) -> OrtStatusPtr>,
	pub ModelMetadataGetDomain:
		Option<unsafe extern "system" fn(model_metadata: *const OrtModelMetadata, allocator: *mut OrtAllocator, value: *mut *mut c_char) -> OrtStatusPtr>,
	pub ModelMetadataGetDescription:
		Option<unsafe extern "system" fn(model_metadata: *const OrtModelMetadata, allocator: *mut OrtAllocator, value: *mut *mut c_char) -> OrtStatusPtr>,
	pub ModelMetadataLookupCustomMetadataMap: Option<
		unsafe extern "system" fn(
			model_metadata: *const OrtModelMetadata,
			allocator: *mut OrtAllocator,
			key: *const c_char,
			value: *mut *mut c_char
		) -> OrtStatusPtr
	>,
	pub ModelMetadataGetVersion: Option<unsafe extern "system" fn(model_metadata: *const OrtModelMetadata, value: *mut i64) -> OrtStatusPtr>,
	pub ReleaseModelMetadata: Option<unsafe extern "system" fn(input: *mut OrtModelMetadata)>,
	pub CreateEnvWithGlobalThreadPools: Option<
		unsafe extern "system" fn(
			log_severity_level: OrtLoggingLevel,
			logid: *const c_char,
			tp_options: *const OrtThreadingOptions,
			out: *mut *mut OrtEnv
		) -> OrtStatusPtr
	>,
	pub DisablePerSessionThreads: Option<unsafe extern "system" fn(options: *mut OrtSessionOptions) -> OrtStatusPtr>,
	pub CreateThreadingOptions: Option<unsafe extern "system" fn(out: *mut *mut OrtThreadingOptions) -> OrtStatusPtr>,
	pub ReleaseThreadingOptions: Option<unsafe extern "system" fn(input: *mut OrtThreadingOptions)>,
	pub ModelMetadataGetCustomMetadataMapKeys: Option<
		unsafe extern "system" fn(
			model_metadata: *const OrtModelMetadata,
			allocator: *mut OrtAllocator,
			keys: *mut *mut *mut c_char,
			num_keys: *mut i64
		) -> OrtStatusPtr
	>,
	pub AddFreeDimensionOverrideByName:
		Option<unsafe extern "system" fn(options: *mut OrtSessionOptions, dim_name: *const c_char, dim_value: i64) -> OrtStatusPtr>,
	pub GetAvailableProviders: Option<unsafe extern "system" fn(out_ptr: *mut *mut *mut c_char, provider_length: *mut c_int) -> OrtStatusPtr>,
	pub ReleaseAvailableProviders: Option<unsafe extern "system" fn(ptr: *mut *mut c_char, providers_length: c_int) -> OrtStatusPtr>,
	pub GetStringTensorElementLength: Option<unsafe extern "system" fn(value: *const OrtValue, index: usize, out: *mut usize) -> OrtStatusPtr>,
	pub GetStringTensorElement: Option<unsafe extern "system" fn(value: *const OrtValue, s_len: usize, index: usize, s: *mut c_void) -> OrtStatusPtr>,
	pub FillStringTensorElement: Option<unsafe extern "system" fn(value: *mut OrtValue, s: *const c_char, index: usize) -> OrtStatusPtr>,
	pub AddSessionConfigEntry:
		Option<unsafe extern "system" fn(options: *mut OrtSessionOptions, config_key: *const c_char, config_value: *const c_char) -> OrtStatusPtr>,
	pub CreateAllocator: Unused,
	pub ReleaseAllocator: Option<unsafe extern "system" fn(input: *mut OrtAllocator)>,
	pub RunWithBinding:
		Option<unsafe extern "system" fn(session: *mut OrtSession, run_options: *const OrtRunOptions, binding_ptr: *const OrtIoBinding) -> OrtStatusPtr>,
	pub CreateIoBinding: Option<unsafe extern "system" fn(session: *mut OrtSession, out: *mut *mut OrtIoBinding) -> OrtStatusPtr>,
	pub ReleaseIoBinding: Option<unsafe extern "system" fn(input: *mut OrtIoBinding)>,
	pub BindInput: Option<unsafe extern "system" fn(binding_ptr: *mut OrtIoBinding, name: *const c_char, val_ptr: *const OrtValue) -> OrtStatusPtr>,
	pub BindOutput: Option<unsafe extern "system" fn(binding_ptr: *mut OrtIoBinding, name: *const c_char, val_ptr: *const OrtValue) -> OrtStatusPtr>,
	pub BindOutputToDevice:
		Option<unsafe extern "system" fn(binding_ptr: *mut OrtIoBinding, name: *const c_char, mem_info_ptr: *const OrtMemoryInfo) -> OrtStatusPtr>,
	pub GetBoundOutputNames: Option<
		unsafe extern "system" fn(
			binding_ptr: *const OrtIoBinding,
			allocator: *mut OrtAllocator,
			buffer: *mut *mut c_char,
			lengths: *mut *mut usize,
			count: *mut usize
		) -> OrtStatusPtr
	>,
	pub GetBoundOutputValues: Option<
		unsafe extern "system" fn(
			binding_ptr: *const OrtIoBinding,
			allocator: *mut OrtAllocator,
			output: *mut *mut *mut OrtValue,
			output_count: *mut usize
		) -> OrtStatusPtr
	>,
	pub ClearBoundInputs: Option<unsafe extern "system" fn(binding_ptr: *mut OrtIoBinding)>,
	pub ClearBoundOutputs: Option<unsafe extern "system" fn(binding_ptr: *mut OrtIoBinding)>,
	pub TensorAt: Unused,
	pub CreateAndRegisterAllocator: Unused,
	pub SetLanguageProjection: Unused,
	pub SessionGetProfilingStartTimeNs: Option<unsafe extern "system" fn(session: *const OrtSession, out: *mut u64) -> OrtStatusPtr>,
	pub SetGlobalIntraOpNumThreads: Option<unsafe extern "system" fn(tp_options: *mut OrtThreadingOptions, intra_op_num_threads: c_int) -> OrtStatusPtr>,
	pub SetGlobalInterOpNumThreads: Option<unsafe extern "system" fn(tp_options: *mut OrtThreadingOptions, inter_op_num_threads: c_int) -> OrtStatusPtr>,
	pub SetGlobalSpinControl: Option<unsafe extern "system" fn(tp_options: *mut OrtThreadingOptions, allow_spinning: c_int) -> OrtStatusPtr>,
	pub AddInitializer: Unused,
	pub CreateEnvWithCustomLoggerAndGlobalThreadPools: Unused,
	pub SessionOptionsAppendExecutionProvider_CUDA: Unused,
	pub SessionOptionsAppendExecutionProvider_ROCM: Unused,
	pub SessionOptionsAppendExecutionProvider_OpenVINO: Unused,
	pub SetGlobalDenormalAsZero: Unused,
	pub CreateArenaCfg: Unused,
	pub ReleaseArenaCfg: Unused,
	pub ModelMetadataGetGraphDescription: Unused,
	pub SessionOptionsAppendExecutionProvider_TensorRT: Unused,
	pub SetCurrentGpuDeviceId: Unused,
	pub GetCurrentGpuDeviceId: Unused,
	pub KernelInfoGetAttributeArray_float: Unused,
	pub KernelInfoGetAttributeArray_int64: Unused,
	pub CreateArenaCfgV2: Unused,
	pub AddRunConfigEntry:
		Option<unsafe extern "system" fn(options: *mut OrtRunOptions, config_key: *const c_char, config_value: *const c_char) -> OrtStatusPtr>,
	pub CreatePrepackedWeightsContainer: Option<unsafe extern "system" fn(out: *mut *mut OrtPrepackedWeightsContainer) -> OrtStatusPtr>,
	pub ReleasePrepackedWeightsContainer: Option<unsafe extern "system" fn(input: *mut OrtPrepackedWeightsContainer)>,
	pub CreateSessionWithPrepackedWeightsContainer: Option<
		unsafe extern "system" fn(
			env: *const OrtEnv,
			model_path: *const ortchar,
			options: *const OrtSessionOptions,
			prepacked_weights_container: *mut OrtPrepackedWeightsContainer,
			out: *mut *mut OrtSession
		) -> OrtStatusPtr
	>,
	pub CreateSessionFromArrayWithPrepackedWeightsContainer: Option<
		unsafe extern "system" fn(
			env: *const OrtEnv,
			model_data: *const c_void,
			model_data_length: usize,
			options: *const OrtSessionOptions,
			prepacked_weights_container: *mut OrtPrepackedWeightsContainer,
			out: *mut *mut OrtSession
		) -> OrtStatusPtr
	>,
	pub SessionOptionsAppendExecutionProvider_TensorRT_V2: Unused,
	pub CreateTensorRTProviderOptions: Unused,
	pub UpdateTensorRTProviderOptions: Unused,
	pub GetTensorRTProviderOptionsAsString: Unused,
	pub ReleaseTensorRTProviderOptions: Unused,
	pub EnableOrtCustomOps: Unused,
	pub RegisterAllocator: Unused,
	pub UnregisterAllocator: Unused,
	pub IsSparseTensor: Unused,
	pub CreateSparseTensorAsOrtValue: Unused,
	pub FillSparseTensorCoo: Unused,
	pub FillSparseTensorCsr: Unused,
	pub FillSparseTensorBlockSparse: Unused,
	pub CreateSparseTensorWithValuesAsOrtValue: Unused,
	pub UseCooIndices: Unused,
	pub UseCsrIndices: Unused,
	pub UseBlockSparseIndices: Unused,
	pub GetSparseTensorFormat: Unused,
	pub GetSparseTensorValuesTypeAndShape: Unused,
	pub GetSparseTensorValues: Unused,
	pub GetSparseTensorIndicesTypeShape: Unused,
	pub GetSparseTensorIndices: Unused,
	pub HasValue: Option<unsafe extern "system" fn(value: *const OrtValue, out: *mut c_int) -> OrtStatusPtr>,
	pub KernelContext_GetGPUComputeStream: Unused,
	pub GetTensorMemoryInfo: Unused,
	pub GetExecutionProviderApi: Unused,
	pub SessionOptionsSetCustomCreateThreadFn: Unused,
	pub SessionOptionsSetCustomThreadCreationOptions: Unused,
	pub SessionOptionsSetCustomJoinThreadFn: Unused,
	pub SetGlobalCustomCreateThreadFn: Unused,
	pub SetGlobalCustomThreadCreationOptions: Unused,
	pub SetGlobalCustomJoinThreadFn: Unused,
	pub SynchronizeBoundInputs: Option<unsafe extern "system" fn(binding_ptr: *mut OrtIoBinding) -> OrtStatusPtr>,
	pub SynchronizeBoundOutputs: Option<unsafe extern "system" fn(binding_ptr: *mut OrtIoBinding) -> OrtStatusPtr>,
	pub SessionOptionsAppendExecutionProvider_CUDA_V2: Unused,
	pub CreateCUDAProviderOptions: Unused,
	pub UpdateCUDAProviderOptions: Unused,
	pub GetCUDAProviderOptionsAsString: Unused,
	pub ReleaseCUDAProviderOptions: Unused,
	pub SessionOptionsAppendExecutionProvider_MIGraphX: Unused,
	pub AddExternalInitializers: Unused,
	pub CreateOpAttr: Unused,
	pub ReleaseOpAttr: Unused,
	pub CreateOp: Unused,
	pub InvokeOp: Unused,
	pub ReleaseOp: Unused,
	pub SessionOptionsAppendExecutionProvider: Option<
		unsafe extern "system" fn(
			options: *mut OrtSessionOptions,
			provider_name: *const c_char,
			provider_options_keys: *const *const c_char,
			provider_options_values: *const *const c_char,
			num_keys: usize
		) -> OrtStatusPtr
	>,
	pub CopyKernelInfo: Unused,
	pub ReleaseKernelInfo: Unused,
	pub GetTrainingApi: Unused,
	pub SessionOptionsAppendExecutionProvider_CANN: Unused,
	pub CreateCANNProviderOptions: Unused,
	pub UpdateCANNProviderOptions: Unused,
	pub GetCANNProviderOptionsAsString: Unused,
	pub ReleaseCANNProviderOptions: Unused,
	pub MemoryInfoGetDeviceType: Unused,
	pub UpdateEnvWithCustomLogLevel: Unused,
	pub SetGlobalIntraOpThreadAffinity: Unused,
	pub RegisterCustomOpsLibrary_V2: Unused,
	pub RegisterCustomOpsUsingFunction: Unused,
	pub KernelInfo_GetInputCount: Unused,
	pub KernelInfo_GetOutputCount: Unused,
	pub KernelInfo_GetInputName: Unused,
	pub KernelInfo_GetOutputName: Unused,
	pub KernelInfo_GetInputTypeInfo: Unused,
	pub KernelInfo_GetOutputTypeInfo: Unused,
	pub KernelInfoGetAttribute_tensor: Unused,
	pub HasSessionConfigEntry: Unused,
	pub GetSessionConfigEntry: Unused,
	pub SessionOptionsAppendExecutionProvider_Dnnl: Unused,
	pub CreateDnnlProviderOptions: Unused,
	pub UpdateDnnlProviderOptions: Unused,
	pub GetDnnlProviderOptionsAsString: Unused,
	pub ReleaseDnnlProviderOptions: Unused,
	pub KernelInfo_GetNodeName: Unused,
	pub KernelInfo_GetLogger: Unused,
	pub KernelContext_GetLogger: Unused,
	pub Logger_LogMessage: Unused,
	pub Logger_GetLoggingSeverityLevel: Unused,
	pub KernelInfoGetConstantInput_tensor: Unused,
	pub CastTypeInfoToOptionalTypeInfo: Unused,
	pub GetOptionalContainedTypeInfo: Unused,
	pub GetResizedStringTensorElementBuffer: Unused,
	pub KernelContext_GetAllocator: Unused,
	pub GetBuildInfoString: Option<unsafe extern "system" fn() -> *const c_char>,
	pub CreateROCMProviderOptions: Unused,
	pub UpdateROCMProviderOptions: Unused,
	pub GetROCMProviderOptionsAsString: Unused,
	pub ReleaseROCMProviderOptions: Unused,
	pub CreateAndRegisterAllocatorV2: Unused,
	pub RunAsync: Unused,
	pub UpdateTensorRTProviderOptionsWithValue: Unused,
	pub GetTensorRTProviderOptionsByName: Unused,
	pub UpdateCUDAProviderOptionsWithValue: Unused,
	pub GetCUDAProviderOptionsByName: Unused,
	pub KernelContext_GetResource: Unused,
	pub SetUserLoggingFunction: Unused,
	pub ShapeInferContext_GetInputCount: Unused,
	pub ShapeInferContext_GetInputTypeShape: Unused,
	pub ShapeInferContext_GetAttribute: Unused,
	pub ShapeInferContext_SetOutputTypeShape: Unused,
	pub SetSymbolicDimensions: Unused,
	pub ReadOpAttr: Unused,
	pub SetDeterministicCompute: Option<unsafe extern "system" fn(options: *mut OrtSessionOptions, value: bool) -> OrtStatusPtr>,
	pub KernelContext_ParallelFor: Unused,
	pub SessionOptionsAppendExecutionProvider_OpenVINO_V2: Unused,
	pub SessionOptionsAppendExecutionProvider_VitisAI: Unused,
	pub KernelContext_GetScratchBuffer: Unused,
	pub KernelInfoGetAllocator: Unused,
	pub AddExternalInitializersFromMemory: Unused,
	pub CreateLoraAdapter:
		Option<unsafe extern "system" fn(adapter_file_path: *const ortchar, allocator: *mut OrtAllocator, out: *mut *mut OrtLoraAdapter) -> OrtStatusPtr>,
	pub CreateLoraAdapterFromArray:
		Option<unsafe extern "system" fn(bytes: *const c_void, num_bytes: usize, allocator: *mut OrtAllocator, out: *mut *mut OrtLoraAdapter) -> OrtStatusPtr>,
	pub ReleaseLoraAdapter: Option<unsafe extern "system" fn(input: *mut OrtLoraAdapter)>,
	pub RunOptionsAddActiveLoraAdapter: Option<unsafe extern "system" fn(options: *mut OrtRunOptions, adapter: *const OrtLoraAdapter) -> OrtStatusPtr>,
	pub SetEpDynamicOptions: Unused
}
