//! Built-in demo program, compiled and executed when the compiler is
//! invoked without a source file.

pub const DEMO_PROGRAM: &str = r#"// Programa de demonstracao da linguagem Lusitano

funcao fatorial(n: inteiro): inteiro {
    se (n <= 1) {
        retorna 1
    }
    retorna n * fatorial(n - 1)
}

funcao ehPar(numero: inteiro): logico {
    retorna numero % 2 == 0
}

funcao somaAte(n: inteiro): inteiro {
    var soma: inteiro = 0
    para i de 1 ate n {
        soma = soma + i
    }
    retorna soma
}

funcao principal() {
    escreva("Linguagem Lusitano")
    escreva("")

    escreva("Fatoriais:")
    para n de 1 ate 6 {
        escreva("  ", n, "! = ", fatorial(n))
    }
    escreva("")

    escreva("Pares e impares:")
    para i de 1 ate 10 {
        se (ehPar(i)) {
            escreva("  ", i, " e par")
        } senao {
            escreva("  ", i, " e impar")
        }
    }
    escreva("")

    var limite: inteiro = 100
    escreva("Soma de 1 ate ", limite, ": ", somaAte(limite))

    escreva("Contagem regressiva:")
    var contador: inteiro = 5
    enquanto (contador > 0) {
        escreva("  ", contador, "...")
        contador -= 1
    }

    var a: inteiro = 10
    var b: inteiro = 3
    escreva("a+b=", a + b, "  a-b=", a - b, "  a*b=", a * b)
    escreva("a/b=", a / b, "  a%b=", a % b, "  a**b=", a ** b)
}
"#;
