// Fixed instruction sent with every plant image
// Author: kelexine (https://github.com/kelexine)

/// Sentinel the model uses for a healthy plant.
pub const HEALTHY_NAME: &str = "Nenhuma";

/// Sentinel the model uses when it cannot assess the image.
pub const UNIDENTIFIED_NAME: &str = "Não identificado";

/// Prompt sent before the image. The field names are part of the public API.
pub const PLANT_DIAGNOSIS_PROMPT: &str = r#"Analise esta imagem de uma planta. Siga RIGOROSAMENTE as seguintes instruções:
1. Identifique se a planta parece saudável ou se apresenta sinais de alguma doença ou praga.
2. Se uma doença ou praga for identificada:
   a. Forneça o NOME COMUM da doença ou praga.
   b. Descreva BREVEMENTE a doença/praga, focando nos sintomas visíveis na imagem e nas suas possíveis causas.
   c. Forneça SUGESTÕES DE TRATAMENTO DETALHADAS E PRÁTICAS, cada uma como um item separado da lista. Inclua, quando aplicável e de forma genérica (sem marcas comerciais):
      - Tipos de produtos que podem ser usados (ex: fungicidas à base de cobre, sabão inseticida, óleo de neem).
      - Técnicas de manejo cultural (ex: rotação de culturas, poda sanitária, ajuste de irrigação e drenagem, remoção e descarte de material infectado).
      - Ações preventivas para evitar recorrência.
      - Quando possível, a frequência ou o momento ideal para cada ação.
3. Se a planta parecer saudável, afirme isso claramente, defina "nome_doenca_praga" como "Nenhuma" e "sugestoes_tratamento" como uma lista vazia ou com recomendações gerais de manutenção.
4. Se a imagem não for clara, não for de uma planta, ou não permitir uma avaliação confiável, explique isso em "descricao", defina "nome_doenca_praga" como "Não identificado" e "sugestoes_tratamento" como uma lista vazia.

A SUA RESPOSTA DEVE SER APENAS UM ÚNICO OBJETO JSON VÁLIDO, sem nenhum texto antes do '{' inicial ou depois do '}' final.
O formato JSON OBRIGATÓRIO é:
{
  "planta_saudavel": true,
  "nome_doenca_praga": "Nome da doença/praga, \"Nenhuma\" se saudável ou \"Não identificado\"",
  "descricao": "Descrição da condição, sintomas, causas ou motivo da não identificação.",
  "sugestoes_tratamento": ["Cada string é uma ação de tratamento ou manejo distinta, detalhada e prática."]
}
O valor de "planta_saudavel" DEVE ser um booleano literal (true ou false, sem aspas).
O valor de "sugestoes_tratamento" DEVE ser uma lista de strings.
Escape corretamente quaisquer aspas duplas dentro das strings."#;
