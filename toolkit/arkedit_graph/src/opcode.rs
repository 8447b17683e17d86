//! Opcode inventories for the two bytecode dialects.
//!
//! A graph is bound to one dialect ([`IsaKind`]) at creation; instruction
//! factories of the other dialect fail with an ISA-mismatch error. The
//! dialect-neutral pseudo-opcodes (constants, parameters, phis, try
//! markers) exist in both inventories so block-level code never needs to
//! branch on the dialect.

/// The bytecode dialect a graph is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IsaKind {
    /// The dynamically-typed dialect (ArkTS/JS).
    Dynamic,
    /// The statically-typed dialect.
    Static,
}

/// Opcode of an instruction, tagged by dialect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Opcode {
    Dynamic(DynOpcode),
    Static(StatOpcode),
}

impl Opcode {
    /// The dialect this opcode belongs to.
    pub fn isa(self) -> IsaKind {
        match self {
            Opcode::Dynamic(_) => IsaKind::Dynamic,
            Opcode::Static(_) => IsaKind::Static,
        }
    }

    /// Whether this is a conditional-jump opcode in its dialect.
    pub fn is_if(self) -> bool {
        matches!(
            self,
            Opcode::Dynamic(DynOpcode::If) | Opcode::Static(StatOpcode::If)
        )
    }

    /// Whether this is a phi pseudo-opcode in its dialect.
    pub fn is_phi(self) -> bool {
        matches!(
            self,
            Opcode::Dynamic(DynOpcode::Phi) | Opcode::Static(StatOpcode::Phi)
        )
    }
}

/// Condition codes carried by `If` instructions.
///
/// The dynamic dialect only materializes equality tests (`Ne`/`Eq`); the
/// full set exists for the static dialect, including the unsigned and
/// test-against-zero forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConditionCode {
    None,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    /// Unsigned <.
    B,
    /// Unsigned <=.
    Be,
    /// Unsigned >.
    A,
    /// Unsigned >=.
    Ae,
    /// `(lhs & rhs) == 0`.
    TstEq,
    /// `(lhs & rhs) != 0`.
    TstNe,
}

/// Opcodes of the dynamically-typed dialect.
///
/// The first block are dialect-neutral pseudo-opcodes; the rest mirror the
/// bytecode instruction set, including the `Callruntime*` intrinsics and
/// the 16-bit `Wide*` encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum DynOpcode {
    Constant,
    Parameter,
    LoadString,
    Try,
    CatchPhi,
    Phi,

    Asyncfunctionenter,
    Asyncfunctionreject,
    Asyncfunctionresolve,
    Asyncgeneratorreject,
    Asyncgeneratorresolve,
    Callarg0,
    Callthis0,
    Callarg1,
    Callthis1,
    Callargs2,
    Callthis2,
    Callargs3,
    Callthis3,
    Copydataproperties,
    Copyrestargs,
    Createarraywithbuffer,
    Createasyncgeneratorobj,
    Createemptyarray,
    Createemptyobject,
    Creategeneratorobj,
    Createiterresultobj,
    Createobjectwithbuffer,
    Createobjectwithexcludedkeys,
    Createregexpwithliteral,
    Debugger,
    Dec,
    Defineclasswithbuffer,
    Definegettersetterbyvalue,
    Definemethod,
    Delobjprop,
    Eq,
    Exp,
    Getasynciterator,
    Getiterator,
    Getnextpropname,
    Getpropiterator,
    Getresumemode,
    Gettemplateobject,
    Getunmappedargs,
    Greater,
    Greatereq,
    Inc,
    Isfalse,
    Isin,
    Istrue,
    If,
    Ldbigint,
    Ldfalse,
    Ldglobal,
    Ldglobalvar,
    Ldhole,
    Ldinfinity,
    Ldlexvar,
    Ldnan,
    Ldnull,
    Ldobjbyindex,
    Ldobjbyname,
    Ldobjbyvalue,
    Ldsuperbyname,
    Ldsuperbyvalue,
    Ldsymbol,
    Ldtrue,
    Ldundefined,
    Less,
    Lesseq,
    Newlexenv,
    Noteq,
    Poplexenv,
    Resumegenerator,
    Return,
    Returnundefined,
    Setgeneratorstate,
    Setobjectwithproto,
    Starrayspread,
    Stglobalvar,
    Stlexvar,
    Stmodulevar,
    Stobjbyindex,
    Stobjbyname,
    Stobjbyvalue,
    Stownbyindex,
    Stownbyname,
    Stownbyvalue,
    Stricteq,
    Strictnoteq,
    Stsuperbyname,
    Stsuperbyvalue,
    Supercallspread,
    Suspendgenerator,
    ThrowConstassignment,
    ThrowDeletesuperproperty,
    ThrowIfnotobject,
    ThrowIfsupernotcorrectcall,
    ThrowPatternnoncoercible,
    Tonumber,
    Tryldglobalbyname,
    Trystglobalbyname,
    Typeof,
    Apply,
    Asyncfunctionawaituncaught,
    Callrange,
    CallruntimeCallinit,
    CallruntimeCreateprivateproperty,
    CallruntimeDefinefieldbyindex,
    CallruntimeDefinefieldbyvalue,
    CallruntimeDefineprivateproperty,
    CallruntimeDefinesendableclass,
    CallruntimeLdsendableclass,
    CallruntimeNotifyconcurrentresult,
    CallruntimeTopropertykey,
    CallruntimeLdsendableexternalmodulevar,
    CallruntimeWideldsendableexternalmodulevar,
    CallruntimeLdsendablelocalmodulevar,
    CallruntimeWideldsendablelocalmodulevar,
    CallruntimeNewsendableenv,
    CallruntimeWidenewsendableenv,
    CallruntimeStsendablevar,
    CallruntimeWidestsendablevar,
    CallruntimeLdsendablevar,
    CallruntimeWideldsendablevar,
    CallruntimeIstrue,
    CallruntimeIsfalse,
    CallruntimeLdlazymodulevar,
    CallruntimeWideldlazymodulevar,
    CallruntimeLdlazysendablemodulevar,
    CallruntimeWideldlazysendablemodulevar,
    CallruntimeSupercallforwardallargs,
    Callthisrange,
    Definepropertybyname,
    Definefieldbyname,
    Definefunc,
    Add2,
    Sub2,
    Mul2,
    Div2,
    Mod2,
    And2,
    Or2,
    Xor2,
    Ashr2,
    Shl2,
    Shr2,
    Neg,
    Not,
    LdaStr,
    Throw,
    Dynamicimport,
    Getmodulenamespace,
    Instanceof,
    Ldexternalmodulevar,
    Ldfunction,
    Ldlocalmodulevar,
    Ldnewtarget,
    Ldprivateproperty,
    Ldthis,
    Ldthisbyname,
    Ldthisbyvalue,
    Newlexenvwithname,
    Newobjapply,
    Newobjrange,
    Stconsttoglobalrecord,
    Stownbynamewithnameset,
    Stownbyvaluewithnameset,
    Stprivateproperty,
    Stthisbyname,
    Stthisbyvalue,
    Sttoglobalrecord,
    Supercallarrowrange,
    Supercallthisrange,
    Testin,
    ThrowNotexists,
    ThrowUndefinedifhole,
    ThrowUndefinedifholewithname,
    Tonumeric,
    WideCallrange,
    WideCallthisrange,
    WideCopyrestargs,
    WideCreateobjectwithexcludedkeys,
    WideGetmodulenamespace,
    WideLdexternalmodulevar,
    WideLdlexvar,
    WideLdlocalmodulevar,
    WideLdobjbyindex,
    WideLdpatchvar,
    WideNewlexenv,
    WideNewlexenvwithname,
    WideNewobjrange,
    WideStlexvar,
    WideStmodulevar,
    WideStobjbyindex,
    WideStownbyindex,
    WideStpatchvar,
    WideSupercallarrowrange,
    WideSupercallthisrange,
}

/// Opcodes of the statically-typed dialect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum StatOpcode {
    Constant,
    Parameter,
    LoadString,
    Try,
    CatchPhi,
    Phi,

    Add,
    Sub,
    Mul,
    Div,
    Mod,
    AddI,
    SubI,
    MulI,
    DivI,
    ModI,
    And,
    Or,
    Xor,
    AndI,
    OrI,
    XorI,
    Shl,
    Shr,
    AShr,
    ShlI,
    ShrI,
    AShrI,
    Neg,
    Not,
    Cast,
    Cmp,
    If,
    Return,
    ReturnVoid,
    CallStatic,
    CallVirtual,
    LoadUndefined,
    LenArray,
    NewArray,
    NewObject,
    IsInstance,
    NullPtr,
}
