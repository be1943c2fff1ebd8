//! NumPy `.npy` 배열 저장/로드
//!
//! 기존 캐시 디렉토리와 호환되도록 NumPy 1.0 형식으로 저장한다.
//! 로드는 1.x/2.x/3.x 헤더, `f8`/`f4`, C/Fortran 순서의 2차원 배열을 지원한다.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use byteorder::{BigEndian, LittleEndian, ReadBytesExt, WriteBytesExt};
use ndarray::{Array2, ShapeBuilder};

use crate::core::error::{BasisError, Result};

const MAGIC: &[u8; 6] = b"\x93NUMPY";
/// 헤더 끝(데이터 시작)의 정렬 단위
const ARRAY_ALIGN: usize = 64;

/// 헤더에서 읽은 배열 정보
#[derive(Debug, Clone, PartialEq)]
struct NpyHeader {
    dtype: DType,
    fortran_order: bool,
    shape: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DType {
    F64 { little_endian: bool },
    F32 { little_endian: bool },
}

impl DType {
    fn item_size(self) -> usize {
        match self {
            DType::F64 { .. } => 8,
            DType::F32 { .. } => 4,
        }
    }

    fn parse(descr: &str) -> Option<Self> {
        match descr {
            "<f8" | "=f8" => Some(DType::F64 { little_endian: true }),
            ">f8" => Some(DType::F64 { little_endian: false }),
            "<f4" | "=f4" => Some(DType::F32 { little_endian: true }),
            ">f4" => Some(DType::F32 { little_endian: false }),
            _ => None,
        }
    }
}

/// `.npy` 파일에서 2차원 배열 로드
pub fn load(path: &Path) -> Result<Array2<f64>> {
    let file = File::open(path).map_err(|e| BasisError::io(path, e))?;
    read_npy(&mut BufReader::new(file)).map_err(|e| classify(path, e))
}

/// 2차원 배열을 `.npy` 파일로 저장
pub fn save(path: &Path, matrix: &Array2<f64>) -> Result<()> {
    let file = File::create(path).map_err(|e| BasisError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_npy(&mut writer, matrix)
        .and_then(|_| writer.flush())
        .map_err(|e| BasisError::io(path, e))
}

// 형식 오류는 InvalidData/UnexpectedEof 로 올라온다
fn classify(path: &Path, err: io::Error) -> BasisError {
    match err.kind() {
        io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => {
            BasisError::invalid(path, err.to_string())
        }
        _ => BasisError::io(path, err),
    }
}

fn invalid_data(msg: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.into())
}

/// 최대 `limit` 바이트까지 읽는다 (파일이 짧으면 더 적게)
fn read_limited<R: Read>(reader: &mut R, limit: usize) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.by_ref().take(limit as u64).read_to_end(&mut buf)?;
    Ok(buf)
}

pub(crate) fn read_npy<R: Read>(reader: &mut R) -> io::Result<Array2<f64>> {
    let header = read_header(reader)?;

    let (rows, cols) = match header.shape.as_slice() {
        [rows, cols] => (*rows, *cols),
        other => {
            return Err(invalid_data(format!(
                "expected a 2-D array, found shape {:?}",
                other
            )))
        }
    };
    let len = rows
        .checked_mul(cols)
        .ok_or_else(|| invalid_data("array shape overflows"))?;
    let byte_len = len
        .checked_mul(header.dtype.item_size())
        .ok_or_else(|| invalid_data("array shape overflows"))?;

    // 헤더의 shape 는 신뢰하지 않는다. 실제로 읽힌 바이트만큼만 할당된다.
    let bytes = read_limited(reader, byte_len)?;
    if bytes.len() != byte_len {
        return Err(invalid_data(format!(
            "array data truncated: shape ({}, {}) needs {} bytes, found {}",
            rows,
            cols,
            byte_len,
            bytes.len()
        )));
    }

    let mut payload = bytes.as_slice();
    let mut data = vec![0.0f64; len];
    match header.dtype {
        DType::F64 { little_endian: true } => payload.read_f64_into::<LittleEndian>(&mut data)?,
        DType::F64 { little_endian: false } => payload.read_f64_into::<BigEndian>(&mut data)?,
        DType::F32 { little_endian } => {
            let mut narrow = vec![0.0f32; len];
            if little_endian {
                payload.read_f32_into::<LittleEndian>(&mut narrow)?;
            } else {
                payload.read_f32_into::<BigEndian>(&mut narrow)?;
            }
            for (dst, src) in data.iter_mut().zip(narrow) {
                *dst = src as f64;
            }
        }
    }

    let matrix = if header.fortran_order {
        Array2::from_shape_vec((rows, cols).f(), data)
            .map_err(|e| invalid_data(e.to_string()))?
            .as_standard_layout()
            .into_owned()
    } else {
        Array2::from_shape_vec((rows, cols), data).map_err(|e| invalid_data(e.to_string()))?
    };
    Ok(matrix)
}

fn read_header<R: Read>(reader: &mut R) -> io::Result<NpyHeader> {
    let mut magic = [0u8; 6];
    reader.read_exact(&mut magic)?;
    if &magic != MAGIC {
        return Err(invalid_data("not a NumPy file"));
    }

    let major = reader.read_u8()?;
    let _minor = reader.read_u8()?;
    let header_len = match major {
        1 => reader.read_u16::<LittleEndian>()? as usize,
        2 | 3 => reader.read_u32::<LittleEndian>()? as usize,
        v => return Err(invalid_data(format!("unsupported format version {}", v))),
    };

    let raw = read_limited(reader, header_len)?;
    if raw.len() != header_len {
        return Err(invalid_data("header truncated"));
    }
    let text = String::from_utf8(raw).map_err(|_| invalid_data("header is not UTF-8"))?;

    parse_header(&text)
}

fn parse_header(text: &str) -> io::Result<NpyHeader> {
    let descr = header_value(text, "descr")?;
    let descr = descr.trim_matches(|c: char| c == '\'' || c == '"');
    let dtype = DType::parse(descr)
        .ok_or_else(|| invalid_data(format!("unsupported dtype '{}'", descr)))?;

    let fortran_order = match header_value(text, "fortran_order")? {
        "True" => true,
        "False" => false,
        other => return Err(invalid_data(format!("bad fortran_order '{}'", other))),
    };

    let shape = header_value(text, "shape")?
        .trim_start_matches('(')
        .trim_end_matches(')')
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.trim_end_matches('L')
                .parse::<usize>()
                .map_err(|_| invalid_data(format!("bad shape entry '{}'", s)))
        })
        .collect::<io::Result<Vec<_>>>()?;

    Ok(NpyHeader {
        dtype,
        fortran_order,
        shape,
    })
}

/// 헤더 딕셔너리에서 `key` 의 값 문자열을 잘라낸다
fn header_value<'a>(text: &'a str, key: &str) -> io::Result<&'a str> {
    let missing = || invalid_data(format!("header has no '{}'", key));

    let start = text
        .find(&format!("'{}'", key))
        .or_else(|| text.find(&format!("\"{}\"", key)))
        .ok_or_else(missing)?;
    let after_key = &text[start + key.len() + 2..];
    let value = after_key.trim_start().strip_prefix(':').ok_or_else(missing)?.trim_start();

    let end = if value.starts_with('(') {
        value.find(')').map(|i| i + 1)
    } else if let Some(quote) = value.chars().next().filter(|c| *c == '\'' || *c == '"') {
        value[1..].find(quote).map(|i| i + 2)
    } else {
        value.find(|c: char| c == ',' || c == '}')
    };
    let end = end.ok_or_else(|| invalid_data(format!("unterminated value for '{}'", key)))?;

    Ok(value[..end].trim())
}

pub(crate) fn write_npy<W: Write>(writer: &mut W, matrix: &Array2<f64>) -> io::Result<()> {
    let (rows, cols) = matrix.dim();
    let dict = format!(
        "{{'descr': '<f8', 'fortran_order': False, 'shape': ({}, {}), }}",
        rows, cols
    );

    // 매직(6) + 버전(2) + 길이(2) + 헤더 + '\n' 이 ARRAY_ALIGN 의 배수가 되도록 공백으로 채운다
    let unpadded = MAGIC.len() + 2 + 2 + dict.len() + 1;
    let padding = ARRAY_ALIGN - unpadded % ARRAY_ALIGN;
    let header_len = dict.len() + padding + 1;
    let header_len = u16::try_from(header_len).map_err(|_| invalid_data("header too long"))?;

    writer.write_all(MAGIC)?;
    writer.write_u8(1)?;
    writer.write_u8(0)?;
    writer.write_u16::<LittleEndian>(header_len)?;
    writer.write_all(dict.as_bytes())?;
    writer.write_all(" ".repeat(padding).as_bytes())?;
    writer.write_u8(b'\n')?;

    // iter() 는 레이아웃과 무관하게 논리적 행 우선 순서
    for value in matrix.iter() {
        writer.write_f64::<LittleEndian>(*value)?;
    }
    Ok(())
}
