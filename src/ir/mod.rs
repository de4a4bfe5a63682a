//! Intermediate Representation object model
//!
//! 诊断层只读借用的 IR 对象模型：函数、指令、基本块、类型、常量、
//! 调试信息和模块标识。诊断记录从不修改 IR，也不比 IR 活得更久。

use std::fmt;
use std::sync::Arc;

/// Debug-info file descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiFile {
    filename: String,
    directory: String,
}

impl DiFile {
    /// Create a new file descriptor
    pub fn new(
        filename: impl Into<String>,
        directory: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            directory: directory.into(),
        }
    }

    /// File name as stored (may be relative)
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Compilation directory as stored
    pub fn directory(&self) -> &str {
        &self.directory
    }
}

/// Debug-info subprogram node (one per function with debug info)
#[derive(Debug, Clone)]
pub struct Subprogram {
    file: Arc<DiFile>,
    scope_line: u32,
}

impl Subprogram {
    /// Create a new subprogram node
    pub fn new(
        file: Arc<DiFile>,
        scope_line: u32,
    ) -> Self {
        Self { file, scope_line }
    }

    pub fn file(&self) -> &Arc<DiFile> {
        &self.file
    }

    /// Line of the function's opening scope
    pub fn scope_line(&self) -> u32 {
        self.scope_line
    }
}

/// A resolved debug location (file, line, column)
#[derive(Debug, Clone)]
pub struct DiLocation {
    file: Arc<DiFile>,
    line: u32,
    column: u32,
}

impl DiLocation {
    pub fn file(&self) -> &Arc<DiFile> {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }
}

/// Debug-location handle attached to instructions
///
/// 与指令绑定的调试位置句柄。可能为空（无调试信息编译时）。
#[derive(Debug, Clone, Default)]
pub struct DebugLoc(Option<Arc<DiLocation>>);

impl DebugLoc {
    /// Create a valid debug location
    pub fn new(
        file: Arc<DiFile>,
        line: u32,
        column: u32,
    ) -> Self {
        Self(Some(Arc::new(DiLocation { file, line, column })))
    }

    /// The empty handle (no debug info)
    pub fn unknown() -> Self {
        Self(None)
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    /// Resolved location, if the handle is valid
    pub fn get(&self) -> Option<&DiLocation> {
        self.0.as_deref()
    }
}

/// IR value type
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Void,
    Int(u32),
    Float,
    Double,
    Ptr,
    Func(FunctionType),
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => write!(f, "void"),
            Type::Int(bits) => write!(f, "i{}", bits),
            Type::Float => write!(f, "float"),
            Type::Double => write!(f, "double"),
            Type::Ptr => write!(f, "ptr"),
            Type::Func(ft) => write!(f, "{}", ft),
        }
    }
}

/// Function signature type
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub ret: Box<Type>,
    pub params: Vec<Type>,
    pub vararg: bool,
}

impl FunctionType {
    pub fn new(
        ret: Type,
        params: Vec<Type>,
    ) -> Self {
        Self {
            ret: Box::new(ret),
            params,
            vararg: false,
        }
    }
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (", self.ret)?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", p)?;
        }
        if self.vararg {
            if !self.params.is_empty() {
                write!(f, ", ")?;
            }
            write!(f, "...")?;
        }
        write!(f, ")")
    }
}

/// Constant value (printed as a bare operand, no type prefix)
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Int(v) => write!(f, "{}", v),
            Constant::Float(v) => write!(f, "{}", v),
            Constant::Bool(v) => write!(f, "{}", v),
            Constant::Null => write!(f, "null"),
        }
    }
}

/// Non-instruction IR values the diagnostics layer can name
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Formal function argument
    Argument { name: String },
    /// Global variable or function symbol
    Global { name: String },
    /// Immediate constant
    Constant(Constant),
}

/// Instruction opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Ret,
    Br,
    Call,
    Load,
    Store,
    Alloca,
    Add,
    Sub,
    Mul,
    Div,
    ICmp,
    Select,
    Phi,
    InlineAsm,
}

impl Opcode {
    /// Opcode mnemonic as spelled in textual IR
    pub fn name(&self) -> &'static str {
        match self {
            Opcode::Ret => "ret",
            Opcode::Br => "br",
            Opcode::Call => "call",
            Opcode::Load => "load",
            Opcode::Store => "store",
            Opcode::Alloca => "alloca",
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::Mul => "mul",
            Opcode::Div => "div",
            Opcode::ICmp => "icmp",
            Opcode::Select => "select",
            Opcode::Phi => "phi",
            Opcode::InlineAsm => "inlineasm",
        }
    }
}

/// Callee of a call instruction
#[derive(Debug, Clone, PartialEq)]
pub enum Callee {
    /// Statically known callee symbol
    Direct(String),
    /// Indirect call; only the signature is known
    Indirect(FunctionType),
}

/// Metadata operand
#[derive(Debug, Clone, PartialEq)]
pub enum MdOperand {
    ConstInt(u64),
    Str(String),
}

/// Metadata node (ordered operand list)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MdNode {
    operands: Vec<MdOperand>,
}

impl MdNode {
    pub fn new(operands: Vec<MdOperand>) -> Self {
        Self { operands }
    }

    pub fn operands(&self) -> &[MdOperand] {
        &self.operands
    }
}

/// IR instruction
///
/// 指令只保留诊断层需要的字段：操作码、调试位置、命名元数据和
/// 调用目标（仅调用指令）。
#[derive(Debug, Clone)]
pub struct Instruction {
    opcode: Opcode,
    debug_loc: DebugLoc,
    metadata: Vec<(String, MdNode)>,
    callee: Option<Callee>,
}

impl Instruction {
    pub fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            debug_loc: DebugLoc::unknown(),
            metadata: Vec::new(),
            callee: None,
        }
    }

    /// Build a call instruction with the given callee
    pub fn call(callee: Callee) -> Self {
        let mut inst = Self::new(Opcode::Call);
        inst.callee = Some(callee);
        inst
    }

    pub fn with_debug_loc(
        mut self,
        loc: DebugLoc,
    ) -> Self {
        self.debug_loc = loc;
        self
    }

    pub fn with_metadata(
        mut self,
        name: impl Into<String>,
        node: MdNode,
    ) -> Self {
        self.metadata.push((name.into(), node));
        self
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn debug_loc(&self) -> &DebugLoc {
        &self.debug_loc
    }

    /// Named metadata attached to this instruction
    pub fn metadata(
        &self,
        name: &str,
    ) -> Option<&MdNode> {
        self.metadata
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, node)| node)
    }

    /// Call target, for call instructions
    pub fn callee(&self) -> Option<&Callee> {
        self.callee.as_ref()
    }
}

/// Basic block
#[derive(Debug, Clone)]
pub struct BasicBlock {
    name: String,
    instructions: Vec<Instruction>,
}

impl BasicBlock {
    pub fn new(
        name: impl Into<String>,
        instructions: Vec<Instruction>,
    ) -> Self {
        Self {
            name: name.into(),
            instructions,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }
}

/// IR function
#[derive(Debug, Clone)]
pub struct Function {
    name: String,
    ty: FunctionType,
    subprogram: Option<Subprogram>,
    blocks: Vec<BasicBlock>,
}

impl Function {
    pub fn new(
        name: impl Into<String>,
        ty: FunctionType,
    ) -> Self {
        Self {
            name: name.into(),
            ty,
            subprogram: None,
            blocks: Vec::new(),
        }
    }

    pub fn with_subprogram(
        mut self,
        sp: Subprogram,
    ) -> Self {
        self.subprogram = Some(sp);
        self
    }

    pub fn with_blocks(
        mut self,
        blocks: Vec<BasicBlock>,
    ) -> Self {
        self.blocks = blocks;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fn_type(&self) -> &FunctionType {
        &self.ty
    }

    pub fn subprogram(&self) -> Option<&Subprogram> {
        self.subprogram.as_ref()
    }

    /// First basic block, or `None` for a declaration with no body
    pub fn entry_block(&self) -> Option<&BasicBlock> {
        self.blocks.first()
    }

    pub fn is_declaration(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Compilation module (identity only; diagnostics never walk its contents)
#[derive(Debug, Clone)]
pub struct IrModule {
    identifier: String,
}

impl IrModule {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

/// Power-of-two alignment in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Align(u64);

impl Align {
    pub fn new(bytes: u64) -> Self {
        debug_assert!(bytes.is_power_of_two());
        Self(bytes)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}
