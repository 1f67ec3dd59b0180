// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#![macro_use]

// Inspired by the macros from the BigUint impl. (doc.rust-lang.org/num/src/num/bigint.rs.html#235-280)
// The reference-reference impl must exist, the three others forward to it.
macro_rules! forward_val_val_binop {
  (impl $imp:ident for $lhs:ty, $method:ident, $rhs:ty => $res:ty) => {
    impl $imp<$rhs> for $lhs {
      type Output = $res;

      fn $method(self, other: $rhs) -> $res {
        (&self).$method(&other)
      }
    }
  }
}

macro_rules! forward_ref_val_binop {
  (impl $imp:ident for $lhs:ty, $method:ident, $rhs:ty => $res:ty) => {
    impl<'a> $imp<$rhs> for &'a $lhs {
      type Output = $res;

      fn $method(self, other: $rhs) -> $res {
        self.$method(&other)
      }
    }
  }
}

macro_rules! forward_val_ref_binop {
  (impl $imp:ident for $lhs:ty, $method:ident, $rhs:ty => $res:ty) => {
    impl<'b> $imp<&'b $rhs> for $lhs {
      type Output = $res;

      fn $method(self, other: &$rhs) -> $res {
        (&self).$method(other)
      }
    }
  }
}

macro_rules! forward_all_binop {
  (impl $imp:ident for $lhs:ty, $method:ident, $rhs:ty => $res:ty) => {
    forward_val_val_binop!(impl $imp for $lhs, $method, $rhs => $res);
    forward_ref_val_binop!(impl $imp for $lhs, $method, $rhs => $res);
    forward_val_ref_binop!(impl $imp for $lhs, $method, $rhs => $res);
  };
}
